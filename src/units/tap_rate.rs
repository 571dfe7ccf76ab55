use serde::{Deserialize, Serialize};

/// 출선 속도(질량 유량) 단위. 내부 기준은 ton/min이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapRateUnit {
    TonPerMinute,
    TonPerHour,
    TonPerDay,
}

fn to_ton_per_min(value: f64, unit: TapRateUnit) -> f64 {
    match unit {
        TapRateUnit::TonPerMinute => value,
        TapRateUnit::TonPerHour => value / 60.0,
        TapRateUnit::TonPerDay => value / 1440.0,
    }
}

fn from_ton_per_min(value: f64, unit: TapRateUnit) -> f64 {
    match unit {
        TapRateUnit::TonPerMinute => value,
        TapRateUnit::TonPerHour => value * 60.0,
        TapRateUnit::TonPerDay => value * 1440.0,
    }
}

/// 출선 속도를 변환한다.
pub fn convert_tap_rate(value: f64, from: TapRateUnit, to: TapRateUnit) -> f64 {
    let base = to_ton_per_min(value, from);
    from_ton_per_min(base, to)
}
