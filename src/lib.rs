//! 출선 계산 로직을 라이브러리로 분리하여 CLI 외의 표시 계층에서도 그대로 쓰게 한다.

pub mod app;
pub mod casting;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod ui_cli;
pub mod units;
