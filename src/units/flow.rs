use serde::{Deserialize, Serialize};

/// 체적 유량 표시 단위. 내부 기준은 m³/h이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowUnit {
    CubicMeterPerHour,
    LiterPerMinute,
    LiterPerSecond,
}

impl FlowUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            FlowUnit::CubicMeterPerHour => "m³/h",
            FlowUnit::LiterPerMinute => "l/min",
            FlowUnit::LiterPerSecond => "l/s",
        }
    }
}

fn to_m3_per_h(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value,
        FlowUnit::LiterPerMinute => value * 60.0 / 1000.0,
        FlowUnit::LiterPerSecond => value * 3.6,
    }
}

fn from_m3_per_h(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value,
        FlowUnit::LiterPerMinute => value * 1000.0 / 60.0,
        FlowUnit::LiterPerSecond => value / 3.6,
    }
}

/// 유량을 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit) -> f64 {
    from_m3_per_h(to_m3_per_h(value, from), to)
}
