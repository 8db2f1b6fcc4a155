//! 보일러 내장 펌프가 라디에이터 회로와 혼합식 바닥난방 1차측을 추가 펌프나
//! 유압 분리기 없이 공급할 수 있는지 판정하는 계산 라이브러리.
//! 계산 코어(`hydraulics`)는 순수 함수이며 CLI는 그 위의 얇은 표시 계층이다.

pub mod app;
pub mod config;
pub mod hydraulics;
pub mod i18n;
pub mod input;
pub mod presets;
pub mod report;
pub mod ui_cli;
pub mod units;
