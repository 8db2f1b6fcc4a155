//! 보일러 내장 펌프의 두 병렬 회로(라디에이터 ∥ 바닥난방 1차측) 공급 가능성 계산 코어.
//! 모든 함수는 순수 함수이며 호출 간 상태를 갖지 않는다.

pub mod analyzer;
pub mod curves;
pub mod flow_solver;

pub use analyzer::{
    analyze_system, head_covers, AnalysisResult, Recommendation, Verdict, HEAD_TOLERANCE_M,
};
pub use curves::{branch_head, branch_k, pump_head, valve_head_loss};
pub use flow_solver::{compute_flows, flow_from_load, FlowResult, CP_FACTOR_M3H};
