//! 출선 계산에서 쓰는 단위 정의 및 변환.

pub mod duration;
pub mod tap_rate;

pub use duration::{convert_duration, format_clock, DurationUnit};
pub use tap_rate::{convert_tap_rate, TapRateUnit};
