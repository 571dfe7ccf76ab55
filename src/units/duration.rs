use serde::{Deserialize, Serialize};

/// 시간 단위. 내부 기준은 분(min)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
}

fn to_minutes(value: f64, unit: DurationUnit) -> f64 {
    match unit {
        DurationUnit::Minute => value,
        DurationUnit::Hour => value * 60.0,
        DurationUnit::Day => value * 1440.0,
    }
}

fn from_minutes(value: f64, unit: DurationUnit) -> f64 {
    match unit {
        DurationUnit::Minute => value,
        DurationUnit::Hour => value / 60.0,
        DurationUnit::Day => value / 1440.0,
    }
}

/// 시간을 변환한다.
pub fn convert_duration(value: f64, from: DurationUnit, to: DurationUnit) -> f64 {
    let base = to_minutes(value, from);
    from_minutes(base, to)
}

/// 기준 시각으로부터의 경과 분을 `HH:MM`으로 표시한다. 24시간을 넘으면 `+1d` 형태로 붙인다.
pub fn format_clock(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    let days = total / 1440;
    let hh = (total % 1440) / 60;
    let mm = total % 60;
    if days > 0 {
        format!("{hh:02}:{mm:02} (+{days}d)")
    } else {
        format!("{hh:02}:{mm:02}")
    }
}
