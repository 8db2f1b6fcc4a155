use serde::{Deserialize, Serialize};

/// 수두 1 m에 해당하는 압력[kPa]. 60~70 °C 물 기준 근사값이다.
pub const KPA_PER_M: f64 = 9.6;

/// 수두(압력) 표시 단위. 내부 기준은 항상 수주 미터(m)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadUnit {
    Meter,
    KiloPascal,
    Bar,
    MilliBar,
}

impl HeadUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            HeadUnit::Meter => "m",
            HeadUnit::KiloPascal => "kPa",
            HeadUnit::Bar => "bar",
            HeadUnit::MilliBar => "mbar",
        }
    }
}

/// kPa 압력강하를 수두[m]로 환산한다.
pub fn kpa_to_head_m(kpa: f64) -> f64 {
    kpa / KPA_PER_M
}

/// 주어진 값을 수두[m]로 변환한다.
pub fn to_meter(value: f64, unit: HeadUnit) -> f64 {
    match unit {
        HeadUnit::Meter => value,
        HeadUnit::KiloPascal => kpa_to_head_m(value),
        HeadUnit::Bar => kpa_to_head_m(value * 100.0),
        HeadUnit::MilliBar => kpa_to_head_m(value / 10.0),
    }
}

/// 수두[m] 값을 원하는 단위로 변환한다.
pub fn from_meter(value_m: f64, unit: HeadUnit) -> f64 {
    match unit {
        HeadUnit::Meter => value_m,
        HeadUnit::KiloPascal => value_m * KPA_PER_M,
        HeadUnit::Bar => value_m * KPA_PER_M / 100.0,
        HeadUnit::MilliBar => value_m * KPA_PER_M * 10.0,
    }
}

/// 수두를 서로 다른 단위로 변환한다.
pub fn convert_head(value: f64, from: HeadUnit, to: HeadUnit) -> f64 {
    from_meter(to_meter(value, from), to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_meter_is_nine_point_six_kpa() {
        assert_relative_eq!(convert_head(1.0, HeadUnit::Meter, HeadUnit::KiloPascal), 9.6);
        assert_relative_eq!(convert_head(1.0, HeadUnit::Bar, HeadUnit::Meter), 100.0 / 9.6);
    }
}
