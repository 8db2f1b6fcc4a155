//! 표시용 단위 정의 및 변환. 계산 코어는 항상 m, m³/h 기준으로 동작한다.

pub mod flow;
pub mod head;

pub use flow::{convert_flow, FlowUnit};
pub use head::{convert_head, kpa_to_head_m, HeadUnit, KPA_PER_M};
