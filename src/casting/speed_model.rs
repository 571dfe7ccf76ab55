//! 출선 비트경과 K 계수로 출선 속도/시간을 계산한다.
//!
//! 속도 모델은 `speed = K × Φ²` 이며, 0 이하의 분모는 오류 대신 0을 반환한다.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// 후행 출선구 개공 지연의 최소값(분)
pub const MIN_FOLLOW_DELAY_MIN: f64 = 3.0;

/// 출선구 하나의 설정. 속도는 항상 계산값이며 저장하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapHoleConfig {
    /// 출선 비트경(mm)
    pub diameter_mm: f64,
    /// 속도 계수 K(ton/min/mm²)
    pub speed_coefficient: f64,
}

impl TapHoleConfig {
    pub fn new(diameter_mm: f64, speed_coefficient: f64) -> Self {
        Self {
            diameter_mm,
            speed_coefficient,
        }
    }

    /// 이 출선구의 출선 속도(ton/min)
    pub fn speed(&self) -> f64 {
        speed(self.diameter_mm, self.speed_coefficient)
    }

    /// 주어진 배출량으로 1회 출선 이벤트를 구성한다.
    pub fn tap(&self, amount_ton: f64) -> TapEvent {
        TapEvent::new(amount_ton, self.speed())
    }
}

/// 1회 출선 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapEvent {
    /// 배출량(ton)
    pub amount_ton: f64,
    /// 출선 속도(ton/min)
    pub speed_ton_per_min: f64,
    /// 출선 시간(min). 속도가 0이면 0
    pub duration_min: f64,
}

impl TapEvent {
    pub fn new(amount_ton: f64, speed_ton_per_min: f64) -> Self {
        Self {
            amount_ton,
            speed_ton_per_min,
            duration_min: tap_duration(amount_ton, speed_ton_per_min),
        }
    }
}

/// 출선 속도를 계산한다: `K × Φ²`. 비트경이나 K가 0 이하이면 0.
pub fn speed(diameter_mm: f64, k: f64) -> f64 {
    if diameter_mm > 0.0 && k > 0.0 {
        k * diameter_mm * diameter_mm
    } else {
        0.0
    }
}

/// 관측 속도로부터 K를 역산한다: `speed / Φ²`.
pub fn inverse_coefficient(speed_ton_per_min: f64, diameter_mm: f64) -> f64 {
    if diameter_mm > 0.0 {
        speed_ton_per_min / (diameter_mm * diameter_mm)
    } else {
        debug!(diameter_mm, "비트경이 0 이하라 K를 0으로 둔다");
        0.0
    }
}

/// 출선 시간(min) = 배출량 / 속도. 속도가 0 이하이면 0.
pub fn tap_duration(amount_ton: f64, speed_ton_per_min: f64) -> f64 {
    if speed_ton_per_min > 0.0 {
        amount_ton / speed_ton_per_min
    } else {
        debug!(speed_ton_per_min, "출선 속도가 0 이하라 출선 시간을 0으로 둔다");
        0.0
    }
}

/// 두 출선구 동시 출선 시의 합산 속도.
pub fn dual_speed(lead_speed: f64, follow_speed: f64) -> f64 {
    lead_speed + follow_speed
}

/// 여러 출선구를 동시에 사용할 때의 합산 속도.
pub fn combined_speed<I>(speeds: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    speeds.into_iter().sum()
}

/// 선행 출선구를 연 뒤 후행 출선구를 열기까지의 권장 지연(min).
///
/// 후행 출선이 더 길면 시간차의 절반을 지연으로 두되 최소 3분을 보장한다.
pub fn ideal_follow_delay(lead_duration_min: f64, follow_duration_min: f64) -> f64 {
    if follow_duration_min > lead_duration_min {
        MIN_FOLLOW_DELAY_MIN.max((follow_duration_min - lead_duration_min) / 2.0)
    } else {
        MIN_FOLLOW_DELAY_MIN
    }
}

/// 후행 출선구 개공 시점 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowDelayPolicy {
    /// 두 출선구를 동시에 연다(지연 0).
    Immediate,
    /// `ideal_follow_delay`를 적용한다.
    #[default]
    Balanced,
}

impl FollowDelayPolicy {
    pub fn delay(self, lead_duration_min: f64, follow_duration_min: f64) -> f64 {
        match self {
            FollowDelayPolicy::Immediate => 0.0,
            FollowDelayPolicy::Balanced => {
                ideal_follow_delay(lead_duration_min, follow_duration_min)
            }
        }
    }
}

/// 2출선구 동시 출선 계획 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualTapPlan {
    pub lead_speed_ton_per_min: f64,
    pub follow_speed_ton_per_min: f64,
    /// 합산 속도(ton/min)
    pub total_speed_ton_per_min: f64,
    /// 선행 출선구 단독 출선 시간(min)
    pub lead_duration_min: f64,
    /// 후행 출선구 단독 출선 시간(min)
    pub follow_duration_min: f64,
    /// 동시 출선 시 소요 시간(min)
    pub combined_duration_min: f64,
    /// 후행 출선구 개공 지연(min)
    pub follow_delay_min: f64,
}

/// 같은 배출량을 두 출선구로 뽑을 때의 속도·시간·지연을 계산한다.
pub fn plan_dual_tap(
    lead: TapHoleConfig,
    follow: TapHoleConfig,
    amount_ton: f64,
    policy: FollowDelayPolicy,
) -> DualTapPlan {
    let lead_event = lead.tap(amount_ton);
    let follow_event = follow.tap(amount_ton);
    let total_speed = dual_speed(lead_event.speed_ton_per_min, follow_event.speed_ton_per_min);
    DualTapPlan {
        lead_speed_ton_per_min: lead_event.speed_ton_per_min,
        follow_speed_ton_per_min: follow_event.speed_ton_per_min,
        total_speed_ton_per_min: total_speed,
        lead_duration_min: lead_event.duration_min,
        follow_duration_min: follow_event.duration_min,
        combined_duration_min: tap_duration(amount_ton, total_speed),
        follow_delay_min: policy.delay(lead_event.duration_min, follow_event.duration_min),
    }
}
