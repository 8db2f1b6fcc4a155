use std::io::{self, Write};
use std::path::Path;

use crate::app::{AppError, OutputFormat, Session};
use crate::i18n::{keys, Translator};
use crate::input::Scenario;
use crate::presets::{BoilerPreset, BoilerSelection};
use crate::units::{convert_flow, convert_head, FlowUnit, HeadUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AnalyzeFile,
    ManualEntry,
    Presets,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ANALYZE_FILE));
    println!("{}", tr.t(keys::MAIN_MENU_MANUAL_ENTRY));
    println!("{}", tr.t(keys::MAIN_MENU_PRESETS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::AnalyzeFile),
            "2" => return Ok(MenuChoice::ManualEntry),
            "3" => return Ok(MenuChoice::Presets),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 시나리오 파일 분석 메뉴. 파일 오류는 메뉴를 종료하지 않고 출력만 한다.
pub fn handle_analyze_file(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    let path = read_line(tr.t(keys::PROMPT_FILE_PATH))?;
    match session.analyze_file(Path::new(path.trim()), OutputFormat::Text) {
        Ok(report) => println!("\n{report}"),
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

/// 보일러 프리셋과 주요 입력을 차례로 받아 분석한다.
pub fn handle_manual_entry(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::MANUAL_HEADING));

    let boilers = session.catalog.boilers();
    for (i, b) in boilers.iter().enumerate() {
        println!("{}) {} ({})", i + 1, b.title, b.key);
    }
    let preset = if boilers.is_empty() {
        None
    } else {
        let idx = read_index(tr, tr.t(keys::MANUAL_PROMPT_ARCHETYPE), boilers.len())?;
        boilers.get(idx)
    };
    let speed = match preset {
        Some(p) => read_speed_label(tr, p)?,
        None => String::new(),
    };

    let mut scenario = Scenario {
        preset: preset.map(|p| BoilerSelection {
            archetype: p.key.clone(),
            speed,
        }),
        ..Scenario::default()
    };
    let inp = &mut scenario.inputs;
    inp.radiator.heat_load_kw = read_f64_or(tr, tr.t(keys::FIELD_RAD_LOAD), 10.0)?;
    inp.radiator.delta_t_k = read_f64_or(tr, tr.t(keys::FIELD_RAD_DT), 20.0)?;
    inp.radiator.ref_pressure_drop_kpa = read_f64_or(tr, tr.t(keys::FIELD_RAD_DP), 10.0)?;
    inp.ufh.heat_load_kw = read_f64_or(tr, tr.t(keys::FIELD_UFH_LOAD), 6.0)?;
    inp.ufh.delta_t_k = read_f64_or(tr, tr.t(keys::FIELD_UFH_DT), 8.0)?;
    inp.ufh.supply_temp_c = read_f64_or(tr, tr.t(keys::FIELD_UFH_SUPPLY), 35.0)?;
    inp.ufh.ref_pressure_drop_kpa = read_f64_or(tr, tr.t(keys::FIELD_UFH_DP), 5.0)?;
    inp.ufh.valve_kvs = read_f64_or(tr, tr.t(keys::FIELD_UFH_KVS), 2.5)?;
    inp.boiler.supply_temp_c = read_f64_or(tr, tr.t(keys::FIELD_BOILER_SUPPLY), 55.0)?;
    inp.boiler.head_margin_pct = read_f64_or(tr, tr.t(keys::FIELD_HEAD_MARGIN), 10.0)?;

    match session.analyze_scenario(&scenario, OutputFormat::Text) {
        Ok(report) => println!("\n{report}"),
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

/// 카탈로그의 보일러 종류와 펌프 단을 출력한다.
pub fn print_presets(session: &Session) {
    let tr = &session.tr;
    let hu = session.config.default_units.head;
    let fu = session.config.default_units.flow;
    println!("{}", tr.t(keys::PRESETS_HEADING));
    for b in session.catalog.boilers() {
        println!("{} — {}", b.key, b.title);
        for s in &b.speeds {
            println!(
                "  {:>3}: H0 = {:.2} {}, Gmax = {:.2} {}",
                s.label,
                convert_head(s.h0_m, HeadUnit::Meter, hu),
                hu.symbol(),
                convert_flow(s.gmax_m3_per_h, FlowUnit::CubicMeterPerHour, fu),
                fu.symbol()
            );
        }
        println!(
            "  {}: {:.2} {} @ {:.2} {}",
            tr.t(keys::PRESETS_INTERNAL_REF),
            convert_head(b.ref_head_m, HeadUnit::Meter, hu),
            hu.symbol(),
            convert_flow(b.ref_flow_m3_per_h, FlowUnit::CubicMeterPerHour, fu),
            fu.symbol()
        );
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(session: &mut Session) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {:?}, {:?}, {} ({})",
        session.tr.t(keys::SETTINGS_CURRENT),
        session.config.default_units.head,
        session.config.default_units.flow,
        session.config.language,
        session.tr.language_code()
    );
    println!("{}", session.tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(session.tr.t(keys::PROMPT_SELECT))?;
    let changed = match sel.trim() {
        "1" => {
            println!("{}", session.tr.t(keys::SETTINGS_HEAD_UNITS));
            let unit = match read_line(session.tr.t(keys::PROMPT_SELECT))?.trim() {
                "1" => Some(HeadUnit::Meter),
                "2" => Some(HeadUnit::KiloPascal),
                "3" => Some(HeadUnit::Bar),
                "4" => Some(HeadUnit::MilliBar),
                _ => None,
            };
            match unit {
                Some(u) => {
                    session.config.default_units.head = u;
                    true
                }
                None => false,
            }
        }
        "2" => {
            println!("{}", session.tr.t(keys::SETTINGS_FLOW_UNITS));
            let unit = match read_line(session.tr.t(keys::PROMPT_SELECT))?.trim() {
                "1" => Some(FlowUnit::CubicMeterPerHour),
                "2" => Some(FlowUnit::LiterPerMinute),
                "3" => Some(FlowUnit::LiterPerSecond),
                _ => None,
            };
            match unit {
                Some(u) => {
                    session.config.default_units.flow = u;
                    true
                }
                None => false,
            }
        }
        "3" => {
            println!("{}", session.tr.t(keys::SETTINGS_LANGUAGES));
            let lang = match read_line(session.tr.t(keys::PROMPT_SELECT))?.trim() {
                "1" => Some("auto"),
                "2" => Some("en"),
                "3" => Some("ko"),
                "4" => Some("ru"),
                _ => None,
            };
            match lang {
                Some(code) => {
                    session.config.language = code.to_string();
                    session.reload_translator();
                    true
                }
                None => false,
            }
        }
        _ => false,
    };
    if changed {
        println!("{}", session.tr.t(keys::SETTINGS_SAVED));
    } else {
        println!("{}", session.tr.t(keys::SETTINGS_INVALID));
    }
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

/// 1부터 시작하는 목록 번호를 읽어 0 기반 인덱스로 돌려준다. 빈 입력은 첫 항목.
fn read_index(tr: &Translator, label: &str, len: usize) -> Result<usize, AppError> {
    loop {
        let s = read_line(&format!("{label} [1]: "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(0);
        }
        match s.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => return Ok(n - 1),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 프리셋에 있는 단 라벨만 받는다. 빈 입력은 "II"(없으면 첫 단).
fn read_speed_label(tr: &Translator, preset: &BoilerPreset) -> Result<String, AppError> {
    let labels: Vec<&str> = preset.speeds.iter().map(|s| s.label.as_str()).collect();
    let default = if labels.contains(&"II") {
        "II"
    } else {
        labels.first().copied().unwrap_or_default()
    };
    loop {
        let s = read_line(&format!(
            "{} ({}) [{default}]: ",
            tr.t(keys::MANUAL_PROMPT_SPEED),
            labels.join("/")
        ))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default.to_string());
        }
        match labels.iter().find(|l| l.eq_ignore_ascii_case(s)) {
            Some(l) => return Ok(l.to_string()),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 숫자를 읽는다. 빈 입력은 기본값.
fn read_f64_or(tr: &Translator, label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
