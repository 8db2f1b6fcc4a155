use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ANALYZE_FILE: &str = "main_menu.analyze_file";
    pub const MAIN_MENU_MANUAL_ENTRY: &str = "main_menu.manual_entry";
    pub const MAIN_MENU_PRESETS: &str = "main_menu.presets";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_FILE_PATH: &str = "prompt.file_path";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PRESETS_HEADING: &str = "presets.heading";
    pub const PRESETS_INTERNAL_REF: &str = "presets.internal_ref";

    pub const MANUAL_HEADING: &str = "manual.heading";
    pub const MANUAL_PROMPT_ARCHETYPE: &str = "manual.prompt_archetype";
    pub const MANUAL_PROMPT_SPEED: &str = "manual.prompt_speed";
    pub const FIELD_RAD_LOAD: &str = "field.radiator_load";
    pub const FIELD_RAD_DT: &str = "field.radiator_dt";
    pub const FIELD_RAD_DP: &str = "field.radiator_dp";
    pub const FIELD_UFH_LOAD: &str = "field.ufh_load";
    pub const FIELD_UFH_DT: &str = "field.ufh_dt";
    pub const FIELD_UFH_SUPPLY: &str = "field.ufh_supply";
    pub const FIELD_UFH_DP: &str = "field.ufh_dp";
    pub const FIELD_UFH_KVS: &str = "field.ufh_kvs";
    pub const FIELD_BOILER_SUPPLY: &str = "field.boiler_supply";
    pub const FIELD_HEAD_MARGIN: &str = "field.head_margin";

    pub const REPORT_BOILER: &str = "report.boiler";
    pub const REPORT_SPEED: &str = "report.speed";
    pub const REPORT_PUMP: &str = "report.pump";
    pub const REPORT_INTERNAL: &str = "report.internal";
    pub const REPORT_FLOWS_HEADING: &str = "report.flows_heading";
    pub const REPORT_RADIATOR_FLOW: &str = "report.radiator_flow";
    pub const REPORT_UFH_LOOP_FLOW: &str = "report.ufh_loop_flow";
    pub const REPORT_MIX_FRACTION: &str = "report.mix_fraction";
    pub const REPORT_UFH_PRIMARY_FLOW: &str = "report.ufh_primary_flow";
    pub const REPORT_TOTAL_FLOW: &str = "report.total_flow";
    pub const REPORT_MIXING_INVALID: &str = "report.mixing_invalid";
    pub const REPORT_VALVE_LOSS: &str = "report.valve_loss";
    pub const REPORT_NO_EXTRA_PUMP: &str = "report.no_extra_pump";
    pub const REPORT_CAPACITY: &str = "report.capacity";
    pub const REPORT_DELIVERED: &str = "report.delivered";
    pub const REPORT_CAPACITY_LIMITED: &str = "report.capacity_limited";
    pub const REPORT_RESIDUAL: &str = "report.residual";
    pub const REPORT_EXTERNAL: &str = "report.external";
    pub const REPORT_MARGIN: &str = "report.margin";
    pub const REPORT_CHECK: &str = "report.check";
    pub const REPORT_BRANCH_RADIATOR: &str = "report.branch_radiator";
    pub const REPORT_BRANCH_UFH: &str = "report.branch_ufh";
    pub const REPORT_RETURN_TEMP: &str = "report.return_temp";
    pub const REPORT_SEPARATOR: &str = "report.separator";
    pub const REPORT_SEPARATOR_NOT_NEEDED: &str = "report.separator_not_needed";
    pub const REPORT_SEPARATOR_NEEDED: &str = "report.separator_needed";
    pub const REPORT_CONCLUSION: &str = "report.conclusion";
    pub const REPORT_MULTI_PUMP_NOTE: &str = "report.multi_pump_note";
    pub const STATUS_OK: &str = "status.ok";
    pub const STATUS_NOT_OK: &str = "status.not_ok";

    pub const RECOMMENDATION_SUFFICIENT: &str = "recommendation.sufficient";
    pub const RECOMMENDATION_SEPARATOR: &str = "recommendation.separator_required";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_HEAD_UNITS: &str = "settings.head_units";
    pub const SETTINGS_FLOW_UNITS: &str = "settings.flow_units";
    pub const SETTINGS_LANGUAGES: &str = "settings.languages";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Ru,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("ru") {
            Language::Ru
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en/ru)에 따라 내장 언어팩으로 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let strings = pack_dir
            .and_then(|dir| load_overrides(dir, lang.as_code()))
            .or_else(|| built_in_pack(lang))
            .unwrap_or_default();
        Self {
            lang,
            strings,
            fallback: built_in_pack(Language::En).unwrap_or_default(),
        }
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 없으면 영어 문자열, 그것도 없으면 키 자체를 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("ru") => Some("ru".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    normalize_lang(&lang)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 중첩 테이블은 점으로 이은 키가 된다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::En => parse_toml_to_map(include_str!("../locales/en.toml")),
        Language::Ko => parse_toml_to_map(include_str!("../locales/ko.toml")),
        Language::Ru => parse_toml_to_map(include_str!("../locales/ru.toml")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_built_in_pack_covers_english_keys() {
        let en = built_in_pack(Language::En).unwrap();
        for lang in [Language::Ko, Language::Ru] {
            let pack = built_in_pack(lang).unwrap();
            for key in en.keys() {
                assert!(pack.contains_key(key), "{lang:?} missing {key}");
            }
        }
    }

    #[test]
    fn resolve_prefers_cli_then_config() {
        assert_eq!(resolve_language("ru-RU", Some("ko")), "ru");
        assert_eq!(resolve_language("auto", Some("ko-kr")), "ko");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let tr = Translator::new("en");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert_eq!(tr.t(keys::STATUS_OK), "OK");
    }
}
