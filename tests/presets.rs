use boiler_pump_check::input::BoilerInputs;
use boiler_pump_check::presets::{BoilerCatalog, BoilerSelection, CatalogError};

fn selection(archetype: &str, speed: &str) -> BoilerSelection {
    BoilerSelection {
        archetype: archetype.into(),
        speed: speed.into(),
    }
}

#[test]
fn condensing_speed_two_populates_boiler_fields() {
    let catalog = BoilerCatalog::built_in();
    let mut boiler = BoilerInputs {
        supply_temp_c: 60.0,
        head_margin_pct: 15.0,
        ..BoilerInputs::default()
    };
    assert!(catalog.apply(&selection("condensing_generic", "II"), &mut boiler));
    assert_eq!(boiler.pump_h0_m, 4.2);
    assert_eq!(boiler.pump_gmax_m3_per_h, 2.40);
    assert_eq!(boiler.internal_ref_head_m, 0.30);
    assert_eq!(boiler.internal_ref_flow_m3_per_h, 1.50);
    // 나머지 필드는 건드리지 않는다
    assert_eq!(boiler.supply_temp_c, 60.0);
    assert_eq!(boiler.head_margin_pct, 15.0);
}

#[test]
fn built_in_catalog_shape() {
    let catalog = BoilerCatalog::built_in();
    let keys: Vec<_> = catalog.boilers().iter().map(|b| b.key.as_str()).collect();
    assert_eq!(
        keys,
        ["condensing_generic", "gas_traditional_generic", "electric_generic"]
    );
    for b in catalog.boilers() {
        let labels: Vec<_> = b.speeds.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["III", "II", "I"], "{}", b.key);
        assert_eq!(b.ref_flow_m3_per_h, 1.50);
    }
    let electric = catalog.select("electric_generic", "I").unwrap();
    assert_eq!((electric.h0_m, electric.gmax_m3_per_h), (3.6, 2.00));
    assert_eq!(electric.ref_head_m, 0.12);
    let gas = catalog.select("gas_traditional_generic", "III").unwrap();
    assert_eq!((gas.h0_m, gas.gmax_m3_per_h, gas.ref_head_m), (4.2, 2.50, 0.20));
}

#[test]
fn unknown_speed_falls_back_to_first_preset() {
    let catalog = BoilerCatalog::built_in();
    let s = catalog.select("condensing_generic", "IV").unwrap();
    assert_eq!((s.h0_m, s.gmax_m3_per_h), (5.0, 2.70));
    assert_eq!(s.label, "III");
    assert_eq!(catalog.select("condensing_generic", "I").unwrap().label, "I");
}

#[test]
fn unknown_archetype_leaves_inputs_untouched() {
    let catalog = BoilerCatalog::built_in();
    let mut boiler = BoilerInputs {
        pump_h0_m: 1.0,
        ..BoilerInputs::default()
    };
    let before = boiler;
    assert!(catalog.select("oil_floor_standing", "II").is_none());
    assert!(!catalog.apply(&selection("oil_floor_standing", "II"), &mut boiler));
    assert_eq!(boiler, before);
}

#[test]
fn custom_catalog_from_toml() {
    let src = r#"
        [[boilers]]
        key = "heat_pump_module"
        title = "Heat pump hydronic module"
        ref_head_m = 0.5
        ref_flow_m3_per_h = 2.0

        [[boilers.speeds]]
        label = "max"
        h0_m = 7.0
        gmax_m3_per_h = 3.2

        [[boilers.speeds]]
        label = "eco"
        h0_m = 5.0
        gmax_m3_per_h = 2.6
    "#;
    let catalog = BoilerCatalog::from_toml_str(src).unwrap();
    let s = catalog.select("heat_pump_module", "eco").unwrap();
    assert_eq!((s.h0_m, s.gmax_m3_per_h, s.ref_head_m, s.ref_flow_m3_per_h), (5.0, 2.6, 0.5, 2.0));
    assert!(catalog.find("condensing_generic").is_none());
}

#[test]
fn catalog_entry_without_speeds_is_rejected() {
    let src = r#"
        [[boilers]]
        key = "empty"
        title = "No pump"
        speeds = []
        ref_head_m = 0.1
        ref_flow_m3_per_h = 1.0
    "#;
    match BoilerCatalog::from_toml_str(src) {
        Err(CatalogError::NoSpeeds(key)) => assert_eq!(key, "empty"),
        other => panic!("unexpected: {other:?}"),
    }
}
