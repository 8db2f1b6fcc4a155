//! 보일러 종류별 내장 펌프 단(speed) 프리셋 카탈로그.
//! 값은 대표 모델 기준 근사치이며 실제 설계 시 제조사 곡선으로 확인해야 한다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::input::BoilerInputs;

/// 카탈로그 로드 오류.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("카탈로그 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// 펌프 단이 하나도 없는 보일러 종류
    #[error("펌프 단이 정의되지 않은 보일러: {0}")]
    NoSpeeds(String),
}

/// 펌프 한 단의 곡선 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedPreset {
    pub label: String,
    /// 무유량 양정 [m]
    pub h0_m: f64,
    /// 무양정 최대 유량 [m³/h]
    pub gmax_m3_per_h: f64,
}

/// 보일러 종류 하나: 제목, 순서가 있는 펌프 단 목록, 내부 저항 기준점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoilerPreset {
    pub key: String,
    pub title: String,
    pub speeds: Vec<SpeedPreset>,
    /// 기준 유량에서의 내부 수두 손실 [m]
    pub ref_head_m: f64,
    pub ref_flow_m3_per_h: f64,
}

/// 보일러 종류 + 펌프 단 선택.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoilerSelection {
    pub archetype: String,
    pub speed: String,
}

/// 선택 결과로 보일러 입력에 채워지는 네 값과 실제로 쓰인 단 라벨.
#[derive(Debug, Clone, PartialEq)]
pub struct BoilerSetting {
    pub label: String,
    pub h0_m: f64,
    pub gmax_m3_per_h: f64,
    pub ref_head_m: f64,
    pub ref_flow_m3_per_h: f64,
}

/// 읽기 전용 프리셋 카탈로그. 호출 측이 만들어 계산 경로에 넘긴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoilerCatalog {
    boilers: Vec<BoilerPreset>,
}

impl BoilerCatalog {
    /// 내장 카탈로그.
    pub fn built_in() -> Self {
        let boilers = BUILT_IN
            .iter()
            .map(|b| BoilerPreset {
                key: b.key.to_string(),
                title: b.title.to_string(),
                speeds: b
                    .speeds
                    .iter()
                    .map(|&(label, h0_m, gmax_m3_per_h)| SpeedPreset {
                        label: label.to_string(),
                        h0_m,
                        gmax_m3_per_h,
                    })
                    .collect(),
                ref_head_m: b.ref_head_m,
                ref_flow_m3_per_h: b.ref_flow_m3_per_h,
            })
            .collect();
        Self { boilers }
    }

    /// TOML(`[[boilers]]` 배열)에서 카탈로그를 읽는다.
    pub fn from_toml_str(src: &str) -> Result<Self, CatalogError> {
        let catalog: BoilerCatalog = toml::from_str(src)?;
        if let Some(b) = catalog.boilers.iter().find(|b| b.speeds.is_empty()) {
            return Err(CatalogError::NoSpeeds(b.key.clone()));
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn boilers(&self) -> &[BoilerPreset] {
        &self.boilers
    }

    pub fn find(&self, key: &str) -> Option<&BoilerPreset> {
        self.boilers.iter().find(|b| b.key == key)
    }

    /// 종류+단을 조회한다. 모르는 단 라벨은 첫 번째 단으로 대체한다.
    pub fn select(&self, archetype: &str, speed: &str) -> Option<BoilerSetting> {
        let preset = self.find(archetype)?;
        let step = match preset.speeds.iter().find(|s| s.label == speed) {
            Some(step) => step,
            None => {
                let first = preset.speeds.first()?;
                tracing::warn!(
                    archetype,
                    requested = speed,
                    used = %first.label,
                    "unknown pump speed, falling back to first preset"
                );
                first
            }
        };
        Some(BoilerSetting {
            label: step.label.clone(),
            h0_m: step.h0_m,
            gmax_m3_per_h: step.gmax_m3_per_h,
            ref_head_m: preset.ref_head_m,
            ref_flow_m3_per_h: preset.ref_flow_m3_per_h,
        })
    }

    /// 선택한 프리셋으로 보일러 입력의 네 필드를 채운다. 모르는 종류면 false.
    pub fn apply(&self, selection: &BoilerSelection, boiler: &mut BoilerInputs) -> bool {
        match self.select(&selection.archetype, &selection.speed) {
            Some(s) => {
                boiler.pump_h0_m = s.h0_m;
                boiler.pump_gmax_m3_per_h = s.gmax_m3_per_h;
                boiler.internal_ref_head_m = s.ref_head_m;
                boiler.internal_ref_flow_m3_per_h = s.ref_flow_m3_per_h;
                true
            }
            None => false,
        }
    }
}

impl Default for BoilerCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

struct StaticPreset {
    key: &'static str,
    title: &'static str,
    speeds: &'static [(&'static str, f64, f64)],
    ref_head_m: f64,
    ref_flow_m3_per_h: f64,
}

const BUILT_IN: &[StaticPreset] = &[
    StaticPreset {
        key: "condensing_generic",
        title: "Condensing gas boiler (typical 24-35 kW)",
        speeds: &[("III", 5.0, 2.70), ("II", 4.2, 2.40), ("I", 3.2, 2.00)],
        ref_head_m: 0.30,
        ref_flow_m3_per_h: 1.50,
    },
    StaticPreset {
        key: "gas_traditional_generic",
        title: "Conventional gas boiler (atmospheric, wall-hung 24-28 kW)",
        speeds: &[("III", 4.2, 2.50), ("II", 3.5, 2.20), ("I", 2.8, 1.90)],
        ref_head_m: 0.20,
        ref_flow_m3_per_h: 1.50,
    },
    StaticPreset {
        key: "electric_generic",
        title: "Electric boiler (wall-hung 6-24 kW)",
        speeds: &[("III", 6.0, 2.70), ("II", 4.8, 2.30), ("I", 3.6, 2.00)],
        ref_head_m: 0.12,
        ref_flow_m3_per_h: 1.50,
    },
];
