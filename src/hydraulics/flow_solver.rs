//! 열부하 → 체적 유량, 3방 혼합밸브의 1차측 혼합비 계산.

use serde::Serialize;

use crate::input::SystemInputs;

/// G[m³/h] = 0.86 · Q[kW] / ΔT[K] (난방 온도 영역의 물).
pub const CP_FACTOR_M3H: f64 = 0.86;

/// 유량 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowResult {
    pub radiator_flow_m3_per_h: f64,
    /// 바닥난방 루프(혼합 후) 순환 유량
    pub ufh_loop_flow_m3_per_h: f64,
    /// 보일러가 혼합밸브로 보내는 1차측 유량
    pub ufh_primary_flow_m3_per_h: f64,
    pub total_flow_m3_per_h: f64,
    /// 루프 유량 중 보일러에서 끌어오는 비율 x ∈ [0, 1]
    pub mix_fraction: f64,
    pub ufh_return_temp_c: f64,
    /// 보일러 공급온도가 루프 환수온도보다 높은지. false면 x는 0으로 강제된다.
    pub mixing_valid: bool,
}

/// 열부하와 온도차로 체적 유량을 구한다. 둘 중 하나라도 0 이하이면 0.
pub fn flow_from_load(heat_load_kw: f64, delta_t_k: f64) -> f64 {
    if heat_load_kw > 0.0 && delta_t_k > 0.0 {
        CP_FACTOR_M3H * heat_load_kw / delta_t_k
    } else {
        0.0
    }
}

/// 두 회로의 유량과 1차측 혼합비를 계산한다.
pub fn compute_flows(inputs: &SystemInputs) -> FlowResult {
    let rad = &inputs.radiator;
    let ufh = &inputs.ufh;
    let t_boiler = inputs.boiler.supply_temp_c;

    let g_rad = flow_from_load(rad.heat_load_kw, rad.delta_t_k);
    let g_loop = flow_from_load(ufh.heat_load_kw, ufh.delta_t_k);
    let t_return = ufh.supply_temp_c - ufh.delta_t_k;

    let mixing_valid = t_boiler > t_return;
    let x = if mixing_valid {
        ((ufh.supply_temp_c - t_return) / (t_boiler - t_return)).clamp(0.0, 1.0)
    } else {
        if g_loop > 0.0 {
            tracing::warn!(
                t_boiler,
                t_return,
                "boiler supply not above UFH return; mixing fraction forced to 0"
            );
        }
        0.0
    };

    let g_primary = g_loop * x;
    FlowResult {
        radiator_flow_m3_per_h: g_rad,
        ufh_loop_flow_m3_per_h: g_loop,
        ufh_primary_flow_m3_per_h: g_primary,
        total_flow_m3_per_h: g_rad + g_primary,
        mix_fraction: x,
        ufh_return_temp_c: t_return,
        mixing_valid,
    }
}
