//! 고로 생산량으로부터 슬래그량, 노내 저선량(hold-up), 회수율, 조업지수를 추정한다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::recommendation::{
    BitBand, OperatingPosture, BIT_DIAMETER_TABLE, OPERATING_POSTURE_TABLE, RECOVERY_RATE_TABLE,
};

/// 장입비 → 고로 출력 환산 수율(경험값)
pub const YIELD_FACTOR: f64 = 0.8;
/// 용선 저선 비율 기본값
pub const DEFAULT_IRON_HOLDUP_FRACTION: f64 = 0.05;
/// 슬래그 저선 비율 기본값(분리 정책)
pub const DEFAULT_SLAG_HOLDUP_FRACTION: f64 = 0.02;
/// 출선 시간 예측식의 분모 보정값
pub const CASTING_TIME_OFFSET: f64 = 0.1;

/// 조업 보조 지수. 단위는 표시용으로만 유지한다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OperatingIndices {
    /// 풍량(Nm³/min)
    pub air_flow: f64,
    /// 노정압(kg/cm²)
    pub furnace_pressure: f64,
    /// 산소부화량(Nm³/hr)
    pub oxygen_injection: f64,
    /// 원료 입도(mm)
    pub raw_material_granulation: f64,
    /// 고로 수명(년)
    pub furnace_lifetime_years: f64,
}

impl OperatingIndices {
    pub fn sum(&self) -> f64 {
        self.air_flow
            + self.furnace_pressure
            + self.oxygen_injection
            + self.raw_material_granulation
            + self.furnace_lifetime_years
    }
}

/// 1회 계산 시점의 고로 상태 스냅샷.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FurnaceState {
    /// 용선 생성 속도(ton/min)
    pub iron_rate_ton_per_min: f64,
    /// 출선비(용선:슬래그)
    pub tap_ratio: f64,
    pub ore_coke_ratio: f64,
    pub indices: OperatingIndices,
}

impl FurnaceState {
    pub fn slag_amount(&self, iron_output_ton: f64) -> f64 {
        slag_amount(iron_output_ton, self.tap_ratio)
    }
}

/// 저선량에 넣는 슬래그량의 산정 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlagBasis {
    /// `고로 출력 / 출선비`
    #[default]
    TapRatio,
    /// `일일생산량 × (1 - T.Fe/100)`
    Tfe,
}

impl SlagBasis {
    /// 두 슬래그량 중 이 기준에 해당하는 값을 고른다.
    pub fn select(self, tap_ratio_slag_ton: f64, tfe_slag_ton: f64) -> f64 {
        match self {
            SlagBasis::TapRatio => tap_ratio_slag_ton,
            SlagBasis::Tfe => tfe_slag_ton,
        }
    }
}

/// 저선량 산정 정책. 현장 자료마다 식이 달라 호출자가 고른다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoldupPolicy {
    /// `(용선 + 슬래그) × fraction`
    Combined { fraction: f64 },
    /// `용선 × iron_fraction + 슬래그 × slag_fraction`
    Split { iron_fraction: f64, slag_fraction: f64 },
}

impl Default for HoldupPolicy {
    fn default() -> Self {
        Self::combined()
    }
}

impl HoldupPolicy {
    /// 단일 비율 0.05
    pub fn combined() -> Self {
        HoldupPolicy::Combined {
            fraction: DEFAULT_IRON_HOLDUP_FRACTION,
        }
    }

    /// 용선 0.05 / 슬래그 0.02
    pub fn split() -> Self {
        HoldupPolicy::Split {
            iron_fraction: DEFAULT_IRON_HOLDUP_FRACTION,
            slag_fraction: DEFAULT_SLAG_HOLDUP_FRACTION,
        }
    }

    fn fractions(self) -> (f64, f64) {
        match self {
            HoldupPolicy::Combined { fraction } => (fraction, fraction),
            HoldupPolicy::Split {
                iron_fraction,
                slag_fraction,
            } => (iron_fraction, slag_fraction),
        }
    }

    /// 용선/슬래그별 저선량을 나누어 계산한다.
    pub fn breakdown(self, iron_output_ton: f64, slag_ton: f64) -> ResidualMelt {
        let (iron_fraction, slag_fraction) = self.fractions();
        let iron_ton = iron_output_ton * iron_fraction;
        let slag_ton = slag_ton * slag_fraction;
        ResidualMelt {
            iron_ton,
            slag_ton,
            total_ton: iron_ton + slag_ton,
        }
    }
}

/// 노내 저선량 내역.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualMelt {
    /// 용선 저선량(ton)
    pub iron_ton: f64,
    /// 슬래그 저선량(ton)
    pub slag_ton: f64,
    /// 노내 총 저선량(ton)
    pub total_ton: f64,
}

/// 비트경 권고 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BitRecommendation {
    pub band: BitBand,
    pub diameter_mm: f64,
}

/// 슬래그량 = 용선량 / 출선비. 출선비가 0 이하이면 0.
pub fn slag_amount(iron_output_ton: f64, tap_ratio: f64) -> f64 {
    if tap_ratio > 0.0 {
        iron_output_ton / tap_ratio
    } else {
        debug!(tap_ratio, "출선비가 0 이하라 슬래그량을 0으로 둔다");
        0.0
    }
}

/// T.Fe(%)로 슬래그량을 추정한다: `일일생산량 × (1 - T.Fe/100)`.
pub fn slag_from_tfe(daily_production_ton: f64, tfe_percent: f64) -> f64 {
    daily_production_ton * (1.0 - tfe_percent / 100.0)
}

/// 고로 출력 = 일일생산량 × Ore/Coke × 0.8
pub fn blast_furnace_output(daily_production_ton: f64, ore_coke_ratio: f64) -> f64 {
    daily_production_ton * ore_coke_ratio * YIELD_FACTOR
}

/// 선택한 정책으로 노내 총 저선량(ton)을 계산한다.
pub fn residual_melt(iron_output_ton: f64, slag_ton: f64, policy: HoldupPolicy) -> f64 {
    policy.breakdown(iron_output_ton, slag_ton).total_ton
}

/// Ore/Coke 비에 따른 회수율. 환원비가 양수이면 `× (1 + (1 - 환원비))`로 보정한다.
pub fn recovery_rate(ore_coke_ratio: f64, reduction_ratio: f64) -> f64 {
    let base = RECOVERY_RATE_TABLE.lookup(ore_coke_ratio);
    if reduction_ratio > 0.0 {
        base * (1.0 + (1.0 - reduction_ratio))
    } else {
        base
    }
}

/// 저선량(ton)으로 출선 비트경을 권고한다. 경계값은 아래 구간으로 떨어진다.
pub fn recommend_bit_diameter(residual_melt_ton: f64) -> BitRecommendation {
    let band = BIT_DIAMETER_TABLE.lookup(residual_melt_ton);
    BitRecommendation {
        band,
        diameter_mm: band.diameter_mm(),
    }
}

/// 조업지수 점수 = 지수 합 / (환원비 + 1). 분모가 0 이하이면 0.
pub fn operating_score(indices: &OperatingIndices, reduction_ratio: f64) -> f64 {
    let denom = reduction_ratio + 1.0;
    if denom > 0.0 {
        indices.sum() / denom
    } else {
        debug!(reduction_ratio, "조업지수 분모가 0 이하라 점수를 0으로 둔다");
        0.0
    }
}

/// 조업지수 점수로 조업 자세를 권고한다. 비트경 권고와는 별개의 테이블이다.
pub fn recommend_operating_posture(score: f64) -> OperatingPosture {
    OPERATING_POSTURE_TABLE.lookup(score)
}

/// 조업지수로 출선 작업 시간(min)을 예측한다: `지수 합 / (Ore/Coke + 1 + 0.1)`.
pub fn predict_casting_time(indices: &OperatingIndices, ore_coke_ratio: f64) -> f64 {
    let denom = ore_coke_ratio + 1.0 + CASTING_TIME_OFFSET;
    if denom > 0.0 {
        indices.sum() / denom
    } else {
        0.0
    }
}

/// 하루 예상 총 출선량 = 1회 배출량 × 일일 출선 횟수
pub fn daily_tap_output(tap_amount_ton: f64, casts_per_day: u32) -> f64 {
    tap_amount_ton * f64::from(casts_per_day)
}
