//! 2차 곡선 모델: 저항 `H = k·G²`, 펌프 `H = H0·(1 − (G/Gmax)²)`.

use crate::units::KPA_PER_M;

/// 기준점(H_ref, G_ref)으로부터 저항 계수 k를 구한다. 어느 한쪽이 0 이하이면 0.
pub fn branch_k(h_ref_m: f64, g_ref_m3_per_h: f64) -> f64 {
    if h_ref_m <= 0.0 || g_ref_m3_per_h <= 0.0 {
        return 0.0;
    }
    h_ref_m / (g_ref_m3_per_h * g_ref_m3_per_h)
}

/// 유량 G에서의 저항 수두 손실 [m].
pub fn branch_head(k: f64, g_m3_per_h: f64) -> f64 {
    k * g_m3_per_h * g_m3_per_h
}

/// 유량 G에서의 펌프 양정 [m]. Gmax 이상에서는 0.
pub fn pump_head(h0_m: f64, gmax_m3_per_h: f64, g_m3_per_h: f64) -> f64 {
    if h0_m <= 0.0 || gmax_m3_per_h <= 0.0 {
        return 0.0;
    }
    let ratio = g_m3_per_h / gmax_m3_per_h;
    if ratio >= 1.0 {
        return 0.0;
    }
    (h0_m * (1.0 - ratio * ratio)).max(0.0)
}

/// Kvs 기준 밸브 수두 손실 [m]: Δp[bar] = (G/Kvs)², bar → kPa → m.
pub fn valve_head_loss(g_m3_per_h: f64, kvs: f64) -> f64 {
    if kvs <= 0.0 || g_m3_per_h <= 0.0 {
        return 0.0;
    }
    let ratio = g_m3_per_h / kvs;
    100.0 * ratio * ratio / KPA_PER_M
}
