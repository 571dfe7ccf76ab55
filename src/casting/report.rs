//! 1회 계산 요청을 속도 모델 → 저선량 추정 → 출선 일정 순으로 합성한다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::residual_melt::{
    self, BitRecommendation, FurnaceState, HoldupPolicy, ResidualMelt, SlagBasis,
};
use super::recommendation::OperatingPosture;
use super::scheduler::{self, AccumulationPoint, CastTimelineEntry, TimelineSummary};
use super::speed_model::{self, DualTapPlan, FollowDelayPolicy, TapEvent, TapHoleConfig};

/// 계산 입력 한 벌.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastingInput {
    /// 주 출선구
    pub tap_hole: TapHoleConfig,
    /// 동시 출선 시 후행 출선구
    pub follow_hole: Option<TapHoleConfig>,
    pub follow_policy: FollowDelayPolicy,
    /// 1회 출선 배출량(ton)
    pub tap_amount_ton: f64,
    /// 일일생산량(ton)
    pub daily_production_ton: f64,
    /// T.Fe(%)
    pub tfe_percent: f64,
    /// 환원비. 0이면 회수율 보정을 하지 않는다
    pub reduction_ratio: f64,
    pub furnace: FurnaceState,
    pub holdup: HoldupPolicy,
    /// 저선량 계산에 쓰는 슬래그량 기준
    pub slag_basis: SlagBasis,
    pub casts_per_day: u32,
    /// 출선구 전환 간격(min)
    pub switch_gap_min: f64,
    pub series_interval_min: f64,
    pub series_total_min: f64,
}

/// 계산 결과 전체. 표시 계층이 그대로 표/차트로 쓴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastingReport {
    pub tap: TapEvent,
    pub dual: Option<DualTapPlan>,
    /// 고로 출력(ton)
    pub furnace_output_ton: f64,
    /// 출선비 기준 슬래그량(ton)
    pub slag_ton: f64,
    /// T.Fe 기준 슬래그량(ton)
    pub slag_from_tfe_ton: f64,
    pub slag_basis: SlagBasis,
    pub residual: ResidualMelt,
    pub bit: BitRecommendation,
    pub recovery_rate: f64,
    pub operating_score: f64,
    pub posture: OperatingPosture,
    /// 조업지수 기반 출선 작업 시간 예측(min)
    pub predicted_casting_time_min: f64,
    /// 하루 예상 총 출선량(ton)
    pub daily_tap_output_ton: f64,
    pub timeline: Vec<CastTimelineEntry>,
    pub timeline_summary: TimelineSummary,
    pub series: Vec<AccumulationPoint>,
}

/// 계산을 한 번 수행한다. 상태를 남기지 않는다.
pub fn evaluate(input: &CastingInput) -> CastingReport {
    let tap = input.tap_hole.tap(input.tap_amount_ton);
    let dual = input.follow_hole.map(|follow| {
        speed_model::plan_dual_tap(
            input.tap_hole,
            follow,
            input.tap_amount_ton,
            input.follow_policy,
        )
    });
    debug!(speed = tap.speed_ton_per_min, duration = tap.duration_min, "속도 모델 완료");

    let furnace = &input.furnace;
    let furnace_output_ton =
        residual_melt::blast_furnace_output(input.daily_production_ton, furnace.ore_coke_ratio);
    let slag_ton = furnace.slag_amount(furnace_output_ton);
    let slag_from_tfe_ton =
        residual_melt::slag_from_tfe(input.daily_production_ton, input.tfe_percent);
    let residual = input.holdup.breakdown(
        furnace_output_ton,
        input.slag_basis.select(slag_ton, slag_from_tfe_ton),
    );
    let bit = residual_melt::recommend_bit_diameter(residual.total_ton);
    let recovery_rate =
        residual_melt::recovery_rate(furnace.ore_coke_ratio, input.reduction_ratio);
    let operating_score = residual_melt::operating_score(&furnace.indices, input.reduction_ratio);
    let posture = residual_melt::recommend_operating_posture(operating_score);
    debug!(residual = residual.total_ton, score = operating_score, "저선량 추정 완료");

    let timeline = scheduler::build_timeline(
        input.casts_per_day as usize,
        tap.duration_min,
        input.switch_gap_min,
    );
    let timeline_summary = scheduler::summarize_timeline(&timeline);
    let series = scheduler::cumulative_series(
        furnace.iron_rate_ton_per_min,
        furnace.tap_ratio,
        input.series_interval_min,
        input.series_total_min,
    );
    debug!(casts = timeline.len(), points = series.len(), "출선 일정 완료");

    CastingReport {
        tap,
        dual,
        furnace_output_ton,
        slag_ton,
        slag_from_tfe_ton,
        slag_basis: input.slag_basis,
        residual,
        bit,
        recovery_rate,
        operating_score,
        posture,
        predicted_casting_time_min: residual_melt::predict_casting_time(
            &furnace.indices,
            furnace.ore_coke_ratio,
        ),
        daily_tap_output_ton: residual_melt::daily_tap_output(
            input.tap_amount_ton,
            input.casts_per_day,
        ),
        timeline,
        timeline_summary,
        series,
    }
}
