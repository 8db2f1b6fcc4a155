//! 시나리오 파일 → 분석 → 보고서/설정 경로 회귀 테스트.
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rstest::rstest;

use boiler_pump_check::app::{self, Cli, OutputFormat, Session};
use boiler_pump_check::config::{self, Config};
use boiler_pump_check::hydraulics::analyze_system;
use boiler_pump_check::i18n::Translator;
use boiler_pump_check::input::{InputError, Scenario};
use boiler_pump_check::presets::BoilerCatalog;
use boiler_pump_check::report::{render_report, ReportContext};
use boiler_pump_check::units::{FlowUnit, HeadUnit};

const TYPICAL: &str = r#"
[preset]
archetype = "condensing_generic"
speed = "II"

[radiator]
heat_load_kw = 10
delta_t_k = 20
ref_pressure_drop_kpa = 10

[ufh]
heat_load_kw = 6
delta_t_k = 8
supply_temp_c = 35
ref_pressure_drop_kpa = 5
valve_kvs = 2.5

[boiler]
supply_temp_c = 55
head_margin_pct = 10
pump_h0_m = 99
"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("boiler_pump_check_{}_{name}", std::process::id()))
}

#[test]
fn preset_overrides_boiler_pump_fields() {
    let scenario = Scenario::from_toml_str(TYPICAL).unwrap();
    let inputs = scenario.resolve(&BoilerCatalog::built_in()).unwrap();
    assert_eq!(inputs.boiler.pump_h0_m, 4.2);
    assert_eq!(inputs.boiler.pump_gmax_m3_per_h, 2.4);
    assert_eq!(inputs.boiler.supply_temp_c, 55.0);
    assert_eq!(inputs.ufh.valve_kvs, 2.5);
}

#[test]
fn non_finite_value_is_rejected_before_analysis() {
    let src = TYPICAL.replace("valve_kvs = 2.5", "valve_kvs = \"NaN\"");
    let scenario = Scenario::from_toml_str(&src).unwrap();
    match scenario.resolve(&BoilerCatalog::built_in()) {
        Err(InputError::NonFinite { field, .. }) => assert_eq!(field, "ufh.valve_kvs"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn english_report_mentions_verdict_and_recommendation() {
    let scenario = Scenario::from_toml_str(TYPICAL).unwrap();
    let catalog = BoilerCatalog::built_in();
    let inputs = scenario.resolve(&catalog).unwrap();
    let result = analyze_system(&inputs);
    let tr = Translator::new("en");
    let ctx = ReportContext {
        catalog: &catalog,
        selection: scenario.preset.as_ref(),
        units: config::DefaultUnits::default(),
    };
    let text = render_report(&result, &inputs, &ctx, &tr);
    assert!(text.contains("Condensing gas boiler"));
    assert!(text.contains("Check: H_res ≥ H_req(with margin) → OK"));
    assert!(text.contains("A hydraulic separator is not required."));
    assert!(text.contains("Three-way valve loss"));
    assert!(!text.contains("below demand"));
}

#[rstest]
#[case("IV")]
#[case("2")]
fn report_names_the_speed_actually_applied(#[case] typed: &str) {
    let src = TYPICAL.replace("speed = \"II\"", &format!("speed = \"{typed}\""));
    let scenario = Scenario::from_toml_str(&src).unwrap();
    let catalog = BoilerCatalog::built_in();
    let inputs = scenario.resolve(&catalog).unwrap();
    assert_eq!(inputs.boiler.pump_h0_m, 5.0);

    let ctx = ReportContext {
        catalog: &catalog,
        selection: scenario.preset.as_ref(),
        units: config::DefaultUnits::default(),
    };
    let text = render_report(&analyze_system(&inputs), &inputs, &ctx, &Translator::new("en"));
    let header = text.lines().next().unwrap();
    assert!(header.ends_with("speed III"), "{header}");
}

#[test]
fn report_flags_capacity_limit_in_selected_units() {
    let src = TYPICAL.replace("heat_load_kw = 10", "heat_load_kw = 60");
    let scenario = Scenario::from_toml_str(&src).unwrap();
    let catalog = BoilerCatalog::built_in();
    let inputs = scenario.resolve(&catalog).unwrap();
    let result = analyze_system(&inputs);
    assert!(result.capacity_limited);

    let ctx = ReportContext {
        catalog: &catalog,
        selection: scenario.preset.as_ref(),
        units: config::DefaultUnits {
            head: HeadUnit::KiloPascal,
            flow: FlowUnit::LiterPerMinute,
        },
    };
    let text = render_report(&result, &inputs, &ctx, &Translator::new("en"));
    assert!(text.contains("(below demand, limited by the pump)"));
    assert!(text.contains("l/min"));
    assert!(text.contains("H0 = 40.32 kPa"));
    assert!(text.contains("required (built-in pump insufficient)"));
}

#[test]
fn config_is_created_then_reloaded() {
    let path = temp_path("config.toml");
    let _ = fs::remove_file(&path);

    let created = config::load_from(&path).unwrap();
    assert_eq!(created, Config::default());
    assert!(path.exists());

    let mut changed = created;
    changed.language = "ru".into();
    changed.default_units.head = HeadUnit::Bar;
    changed.save_to(&path).unwrap();
    assert_eq!(config::load_from(&path).unwrap(), changed);

    fs::remove_file(&path).unwrap();
}

#[test]
fn session_analyses_scenario_file_as_toml() {
    let cfg = temp_path("session_config.toml");
    let scenario = temp_path("scenario.toml");
    let _ = fs::remove_file(&cfg);
    fs::write(&scenario, TYPICAL).unwrap();

    let cli = Cli::parse_from([
        "boiler_pump_check",
        "--lang",
        "en",
        "--config",
        cfg.to_str().unwrap(),
    ]);
    let session = Session::open(&cli).unwrap();
    let out = session.analyze_file(&scenario, OutputFormat::Toml).unwrap();
    assert!(out.contains("feasible = true"));
    assert!(out.contains("recommendation = \"BuiltInPumpSufficient\""));

    let text = session.analyze_file(&scenario, OutputFormat::Text).unwrap();
    assert!(text.contains("Conclusion:"));

    fs::remove_file(&cfg).unwrap();
    fs::remove_file(&scenario).unwrap();
}

#[test]
fn error_messages_follow_configured_language() {
    let cfg = temp_path("error_lang_config.toml");
    let saved = Config {
        language: "ru".into(),
        ..Config::default()
    };
    saved.save_to(&cfg).unwrap();

    assert_eq!(app::error_translator("auto", Some(cfg.as_path())).language_code(), "ru");
    assert_eq!(app::error_translator("ko", Some(cfg.as_path())).language_code(), "ko");

    fs::remove_file(&cfg).unwrap();
}
