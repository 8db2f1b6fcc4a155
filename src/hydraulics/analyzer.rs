use serde::Serialize;

use super::curves::{branch_head, branch_k, pump_head, valve_head_loss};
use super::flow_solver::{compute_flows, FlowResult};
use crate::input::SystemInputs;
use crate::units::kpa_to_head_m;

/// 최종 권고. 판정값에 1:1로 대응한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    /// 내장 펌프 잔여 양정으로 충분, 유압 분리기 불필요
    BuiltInPumpSufficient,
    /// 잔여 양정 부족, 유압 분리기(또는 양정 증대/저항 감소) 필요
    SeparatorRequired,
}

impl Recommendation {
    pub fn from_feasible(feasible: bool) -> Self {
        if feasible {
            Recommendation::BuiltInPumpSufficient
        } else {
            Recommendation::SeparatorRequired
        }
    }

    /// 기본(영문) 문구. 현지화 문구는 CLI 쪽 번역기에서 가져온다.
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::BuiltInPumpSufficient => {
                "The built-in pump's residual head is sufficient. A hydraulic separator is not required."
            }
            Recommendation::SeparatorRequired => {
                "The built-in pump's residual head is insufficient. Install a hydraulic separator \
                 (and/or raise the pump head or reduce system resistance)."
            }
        }
    }
}

/// 수두 비교 허용 오차 [m]. 한계 유량 운전점에서는 잔여 양정이 요구 수두와
/// 이론상 같으므로 부동소수점 반올림으로 판정이 뒤집히지 않게 한다.
pub const HEAD_TOLERANCE_M: f64 = 1e-9;

/// 잔여 양정이 요구 수두를 덮는지 여부.
pub fn head_covers(residual_head_m: f64, required_head_m: f64) -> bool {
    residual_head_m + HEAD_TOLERANCE_M >= required_head_m
}

/// 공급 판정의 두 조건. 유량 충족과 수두 충족은 서로 독립적으로 평가된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub flow_sufficient: bool,
    pub head_sufficient: bool,
}

impl Verdict {
    pub fn evaluate(
        delivered_m3_per_h: f64,
        demand_m3_per_h: f64,
        residual_head_m: f64,
        required_head_with_margin_m: f64,
    ) -> Self {
        Self {
            flow_sufficient: delivered_m3_per_h >= demand_m3_per_h,
            head_sufficient: head_covers(residual_head_m, required_head_with_margin_m),
        }
    }

    pub fn feasible(&self) -> bool {
        self.flow_sufficient && self.head_sufficient
    }
}

/// 시스템 분석 결과. 표시 측이 다시 계산할 필요가 없도록 중간값을 모두 담는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// 저항 계수 k [m/(m³/h)²]
    pub k_radiator: f64,
    pub k_ufh_primary: f64,
    pub k_boiler_internal: f64,
    /// 설계 유량에서 각 회로가 요구하는 수두 [m]
    pub radiator_head_required_m: f64,
    /// 1차측 배관 + 혼합밸브
    pub ufh_primary_head_required_m: f64,
    pub ufh_valve_head_loss_m: f64,
    /// 외부 회로 요구 수두 = 두 병렬 회로 중 큰 값
    pub external_head_required_m: f64,
    /// 1 + 여유율/100
    pub margin: f64,
    /// 펌프 곡선 + 내부 저항 + 외부 요구로 정해지는 한계 유량
    pub capacity_flow_m3_per_h: f64,
    pub delivered_flow_m3_per_h: f64,
    pub internal_head_loss_m: f64,
    pub pump_head_m: f64,
    /// 보일러 출구 잔여 양정 [m]
    pub residual_head_m: f64,
    pub feasible: bool,
    pub capacity_limited: bool,
    pub radiator_head_ok: bool,
    pub ufh_head_ok: bool,
    pub boiler_return_temp_c: f64,
    pub recommendation: Recommendation,
    pub verdict: Verdict,
    pub flows: FlowResult,
}

impl AnalysisResult {
    /// 여유율을 반영한 외부 요구 수두 [m].
    pub fn external_head_with_margin_m(&self) -> f64 {
        self.external_head_required_m * self.margin
    }
}

/// 펌프 곡선과 내부 저항을 고려해 보일러가 외부 회로로 보낼 수 있는 최대 유량.
///
/// `H0·(1 − (G/Gmax)²) − k_int·G² = H_req`를 G에 대해 푼 값이며 Gmax로 제한된다.
/// 펌프 곡선이 정의되지 않으면 0.
pub fn capacity_flow(h0_m: f64, gmax_m3_per_h: f64, k_internal: f64, required_head_m: f64) -> f64 {
    let denom = if h0_m > 0.0 && gmax_m3_per_h > 0.0 {
        h0_m / (gmax_m3_per_h * gmax_m3_per_h) + k_internal
    } else {
        0.0
    };
    if denom <= 0.0 {
        return 0.0;
    }
    let numer = h0_m - required_head_m;
    (numer / denom).max(0.0).sqrt().min(gmax_m3_per_h)
}

/// 회로별 환수온도를 실제 공급 유량으로 가중 평균한 보일러 환수온도.
fn boiler_return_temp(
    inputs: &SystemInputs,
    flows: &FlowResult,
    delivered_m3_per_h: f64,
) -> f64 {
    let t_boiler = inputs.boiler.supply_temp_c;
    let demand = flows.total_flow_m3_per_h;
    let scale = if demand > 0.0 {
        delivered_m3_per_h / demand
    } else {
        0.0
    };
    let g_rad = flows.radiator_flow_m3_per_h * scale;
    let g_ufh = flows.ufh_primary_flow_m3_per_h * scale;
    let g_sum = g_rad + g_ufh;
    if g_sum <= 0.0 {
        return t_boiler;
    }
    let t_rad_return = t_boiler - inputs.radiator.delta_t_k;
    (g_rad * t_rad_return + g_ufh * flows.ufh_return_temp_c) / g_sum
}

/// 입력 전체를 분석해 내장 펌프만으로 두 회로를 공급할 수 있는지 판정한다.
pub fn analyze_system(inputs: &SystemInputs) -> AnalysisResult {
    let flows = compute_flows(inputs);
    let rad = &inputs.radiator;
    let ufh = &inputs.ufh;
    let boiler = &inputs.boiler;

    // kPa 기준값이 있으면 우선, G_ref는 회로 자체의 설계 유량을 우선한다
    let h_ref_rad = if rad.ref_pressure_drop_kpa > 0.0 {
        kpa_to_head_m(rad.ref_pressure_drop_kpa)
    } else {
        rad.ref_head_m
    };
    let g_ref_rad = if flows.radiator_flow_m3_per_h > 0.0 {
        flows.radiator_flow_m3_per_h
    } else {
        rad.ref_flow_m3_per_h
    };
    let h_ref_ufh = if ufh.ref_pressure_drop_kpa > 0.0 {
        kpa_to_head_m(ufh.ref_pressure_drop_kpa)
    } else {
        ufh.ref_head_m
    };
    let g_ref_ufh = if flows.ufh_primary_flow_m3_per_h > 0.0 {
        flows.ufh_primary_flow_m3_per_h
    } else {
        ufh.ref_flow_m3_per_h
    };

    let k_rad = branch_k(h_ref_rad, g_ref_rad);
    let k_ufh = branch_k(h_ref_ufh, g_ref_ufh);
    let k_int = branch_k(boiler.internal_ref_head_m, boiler.internal_ref_flow_m3_per_h);
    if k_rad == 0.0 && flows.radiator_flow_m3_per_h > 0.0 {
        tracing::debug!("radiator branch has no resistance reference");
    }
    if k_ufh == 0.0 && flows.ufh_primary_flow_m3_per_h > 0.0 {
        tracing::debug!("UFH primary branch has no resistance reference");
    }

    let h_valve = valve_head_loss(flows.ufh_primary_flow_m3_per_h, ufh.valve_kvs);
    let h_rad = branch_head(k_rad, flows.radiator_flow_m3_per_h);
    let h_ufh = branch_head(k_ufh, flows.ufh_primary_flow_m3_per_h) + h_valve;
    let h_ext = h_rad.max(h_ufh);

    let margin = 1.0 + boiler.head_margin_pct / 100.0;
    let h_required = h_ext * margin;

    let g_capacity = capacity_flow(boiler.pump_h0_m, boiler.pump_gmax_m3_per_h, k_int, h_required);
    let demand = flows.total_flow_m3_per_h;
    let delivered = demand.min(g_capacity);

    let h_internal = branch_head(k_int, delivered);
    let h_pump = pump_head(boiler.pump_h0_m, boiler.pump_gmax_m3_per_h, delivered);
    let h_residual = (h_pump - h_internal).max(0.0);

    let verdict = Verdict::evaluate(delivered, demand, h_residual, h_required);
    let feasible = verdict.feasible();

    tracing::debug!(
        k_rad,
        k_ufh,
        k_int,
        h_valve,
        h_ext,
        margin,
        g_capacity,
        delivered,
        h_residual,
        feasible,
        "hydraulic analysis"
    );

    AnalysisResult {
        flows,
        k_radiator: k_rad,
        k_ufh_primary: k_ufh,
        k_boiler_internal: k_int,
        radiator_head_required_m: h_rad,
        ufh_primary_head_required_m: h_ufh,
        ufh_valve_head_loss_m: h_valve,
        external_head_required_m: h_ext,
        margin,
        capacity_flow_m3_per_h: g_capacity,
        delivered_flow_m3_per_h: delivered,
        internal_head_loss_m: h_internal,
        pump_head_m: h_pump,
        residual_head_m: h_residual,
        verdict,
        feasible,
        capacity_limited: delivered < demand,
        radiator_head_ok: head_covers(h_residual, h_rad * margin),
        ufh_head_ok: head_covers(h_residual, h_ufh * margin),
        boiler_return_temp_c: boiler_return_temp(inputs, &flows, delivered),
        recommendation: Recommendation::from_feasible(feasible),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_without_pump_curve_is_zero() {
        assert_eq!(capacity_flow(0.0, 2.4, 0.1, 0.0), 0.0);
        assert_eq!(capacity_flow(4.2, 0.0, 0.1, 0.0), 0.0);
    }

    #[test]
    fn capacity_with_no_external_demand_hits_curve_intersection() {
        // k_int = 0 → 외부 요구 0이면 Gmax까지 낼 수 있다
        assert!((capacity_flow(4.0, 2.0, 0.0, 0.0) - 2.0).abs() < 1e-12);
        // 요구 수두가 H0 이상이면 0
        assert_eq!(capacity_flow(4.0, 2.0, 0.0, 4.5), 0.0);
    }
}
