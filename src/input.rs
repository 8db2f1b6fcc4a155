//! 계산 입력 레코드와 시나리오 파일(TOML) 읽기.
//!
//! 누락되었거나 숫자가 아닌 필드는 0으로 읽는다. 유한하지 않은 값(NaN, inf)은
//! 계산 코어에 들어가기 전에 [`SystemInputs::validate`]에서 걸러낸다.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::presets::{BoilerCatalog, BoilerSelection};

/// 입력 읽기/검증 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum InputError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 파싱 오류
    #[error("시나리오 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// 유한하지 않은 수치
    #[error("유한한 숫자가 아닙니다: {field} = {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// 숫자, 숫자 문자열은 그대로 읽고 그 외 값은 0으로 읽는다.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(v) => v,
        Raw::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Raw::Other(_) => 0.0,
    })
}

/// 라디에이터 회로 입력.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiatorInputs {
    /// 열부하 [kW]
    #[serde(deserialize_with = "lenient_f64")]
    pub heat_load_kw: f64,
    /// 공급-환수 온도차 [K]
    #[serde(deserialize_with = "lenient_f64")]
    pub delta_t_k: f64,
    /// 설계 유량에서의 기준 압력강하 [kPa]. 0이면 `ref_head_m`을 사용한다.
    #[serde(deserialize_with = "lenient_f64")]
    pub ref_pressure_drop_kpa: f64,
    /// 기준 수두 [m]
    #[serde(deserialize_with = "lenient_f64")]
    pub ref_head_m: f64,
    /// 설계 유량이 0일 때 쓰는 기준 유량 [m³/h]
    #[serde(deserialize_with = "lenient_f64")]
    pub ref_flow_m3_per_h: f64,
}

/// 바닥난방(혼합 루프) 입력.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UfhInputs {
    /// 열부하 [kW]
    #[serde(deserialize_with = "lenient_f64")]
    pub heat_load_kw: f64,
    /// 루프 온도차 [K]
    #[serde(deserialize_with = "lenient_f64")]
    pub delta_t_k: f64,
    /// 혼합밸브 후단 공급온도 [°C]
    #[serde(deserialize_with = "lenient_f64")]
    pub supply_temp_c: f64,
    /// 1차측(혼합밸브 전) 기준 압력강하 [kPa]
    #[serde(deserialize_with = "lenient_f64")]
    pub ref_pressure_drop_kpa: f64,
    /// 1차측 기준 수두 [m]
    #[serde(deserialize_with = "lenient_f64")]
    pub ref_head_m: f64,
    /// 1차측 설계 유량이 0일 때 쓰는 기준 유량 [m³/h]
    #[serde(deserialize_with = "lenient_f64")]
    pub ref_flow_m3_per_h: f64,
    /// 3방 혼합밸브 Kvs [m³/h @ 1 bar]
    #[serde(deserialize_with = "lenient_f64")]
    pub valve_kvs: f64,
}

/// 보일러(내장 펌프 + 내부 저항) 입력.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoilerInputs {
    /// 보일러 공급온도 [°C]
    #[serde(deserialize_with = "lenient_f64")]
    pub supply_temp_c: f64,
    /// 무유량 양정 H0 [m]
    #[serde(deserialize_with = "lenient_f64")]
    pub pump_h0_m: f64,
    /// 무양정 최대 유량 Gmax [m³/h]
    #[serde(deserialize_with = "lenient_f64")]
    pub pump_gmax_m3_per_h: f64,
    /// 내부 저항 기준 수두 [m]
    #[serde(deserialize_with = "lenient_f64")]
    pub internal_ref_head_m: f64,
    /// 내부 저항 기준 유량 [m³/h]
    #[serde(deserialize_with = "lenient_f64")]
    pub internal_ref_flow_m3_per_h: f64,
    /// 수두 여유율 [%]
    #[serde(deserialize_with = "lenient_f64")]
    pub head_margin_pct: f64,
}

/// 한 번의 계산에 쓰이는 전체 입력.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInputs {
    pub radiator: RadiatorInputs,
    pub ufh: UfhInputs,
    pub boiler: BoilerInputs,
}

impl SystemInputs {
    /// 모든 수치가 유한한지 확인한다.
    pub fn validate(&self) -> Result<(), InputError> {
        let fields: [(&'static str, f64); 18] = [
            ("radiator.heat_load_kw", self.radiator.heat_load_kw),
            ("radiator.delta_t_k", self.radiator.delta_t_k),
            ("radiator.ref_pressure_drop_kpa", self.radiator.ref_pressure_drop_kpa),
            ("radiator.ref_head_m", self.radiator.ref_head_m),
            ("radiator.ref_flow_m3_per_h", self.radiator.ref_flow_m3_per_h),
            ("ufh.heat_load_kw", self.ufh.heat_load_kw),
            ("ufh.delta_t_k", self.ufh.delta_t_k),
            ("ufh.supply_temp_c", self.ufh.supply_temp_c),
            ("ufh.ref_pressure_drop_kpa", self.ufh.ref_pressure_drop_kpa),
            ("ufh.ref_head_m", self.ufh.ref_head_m),
            ("ufh.ref_flow_m3_per_h", self.ufh.ref_flow_m3_per_h),
            ("ufh.valve_kvs", self.ufh.valve_kvs),
            ("boiler.supply_temp_c", self.boiler.supply_temp_c),
            ("boiler.pump_h0_m", self.boiler.pump_h0_m),
            ("boiler.pump_gmax_m3_per_h", self.boiler.pump_gmax_m3_per_h),
            ("boiler.internal_ref_head_m", self.boiler.internal_ref_head_m),
            (
                "boiler.internal_ref_flow_m3_per_h",
                self.boiler.internal_ref_flow_m3_per_h,
            ),
            ("boiler.head_margin_pct", self.boiler.head_margin_pct),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some(&(field, value)) => Err(InputError::NonFinite { field, value }),
            None => Ok(()),
        }
    }
}

/// 시나리오 파일: 선택적 보일러 프리셋과 입력값.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub preset: Option<BoilerSelection>,
    #[serde(flatten)]
    pub inputs: SystemInputs,
}

impl Scenario {
    pub fn from_toml_str(src: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 프리셋을 적용하고 검증까지 마친 입력을 돌려준다.
    /// 카탈로그에 없는 보일러 종류는 입력을 바꾸지 않는다.
    pub fn resolve(&self, catalog: &BoilerCatalog) -> Result<SystemInputs, InputError> {
        let mut inputs = self.inputs;
        if let Some(sel) = &self.preset {
            if !catalog.apply(sel, &mut inputs.boiler) {
                tracing::warn!(archetype = %sel.archetype, "unknown boiler archetype, preset ignored");
            }
        }
        inputs.validate()?;
        Ok(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_non_numeric_fields_read_as_zero() {
        let src = r#"
            [radiator]
            heat_load_kw = "12.5"
            delta_t_k = "twenty"
            ref_head_m = true

            [boiler]
            supply_temp_c = 60
        "#;
        let sc = Scenario::from_toml_str(src).unwrap();
        assert_eq!(sc.inputs.radiator.heat_load_kw, 12.5);
        assert_eq!(sc.inputs.radiator.delta_t_k, 0.0);
        assert_eq!(sc.inputs.radiator.ref_head_m, 0.0);
        assert_eq!(sc.inputs.boiler.supply_temp_c, 60.0);
        assert_eq!(sc.inputs.ufh, UfhInputs::default());
        assert!(sc.preset.is_none());
    }

    #[test]
    fn validate_rejects_non_finite() {
        let mut inputs = SystemInputs::default();
        inputs.ufh.valve_kvs = f64::NAN;
        match inputs.validate() {
            Err(InputError::NonFinite { field, .. }) => assert_eq!(field, "ufh.valve_kvs"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
