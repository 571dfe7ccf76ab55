//! A/B 출선구 교대 출선 일정과 시간별 누적 생산량 계열.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 한 번에 만드는 출선 일정의 최대 행 수. 넘으면 잘라낸다.
pub const MAX_CAST_COUNT: usize = 10_000;

/// 누적 계열의 최대 샘플 간격 수. 점 개수는 이 값 + 1까지다.
pub const MAX_SERIES_STEPS: usize = 100_000;

/// 교대로 사용하는 출선구 표식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TapHoleLabel {
    A,
    B,
}

impl TapHoleLabel {
    /// 0부터 시작하는 출선 순번의 표식. 짝수 A, 홀수 B.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            TapHoleLabel::A
        } else {
            TapHoleLabel::B
        }
    }
}

impl std::fmt::Display for TapHoleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TapHoleLabel::A => write!(f, "A"),
            TapHoleLabel::B => write!(f, "B"),
        }
    }
}

/// 출선 일정의 한 행.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastTimelineEntry {
    /// 1부터 시작하는 출선 번호
    pub cast_index: usize,
    pub tap_hole: TapHoleLabel,
    pub start_min: f64,
    pub end_min: f64,
}

/// 출선 `cast_count`회를 A부터 교대로 배치한다.
///
/// `start[i+1] = end[i] + switch_gap`. 홀수 횟수면 마지막은 A로 끝난다.
/// `MAX_CAST_COUNT`를 넘는 횟수는 앞쪽 `MAX_CAST_COUNT`회만 낸다.
pub fn timeline(
    cast_count: usize,
    cast_duration_min: f64,
    switch_gap_min: f64,
) -> impl Iterator<Item = CastTimelineEntry> {
    let cycle = cast_duration_min + switch_gap_min;
    (0..cast_count.min(MAX_CAST_COUNT)).map(move |i| {
        let start_min = i as f64 * cycle;
        CastTimelineEntry {
            cast_index: i + 1,
            tap_hole: TapHoleLabel::for_index(i),
            start_min,
            end_min: start_min + cast_duration_min,
        }
    })
}

/// `timeline`을 벡터로 구체화한다.
pub fn build_timeline(
    cast_count: usize,
    cast_duration_min: f64,
    switch_gap_min: f64,
) -> Vec<CastTimelineEntry> {
    debug!(cast_count, cast_duration_min, switch_gap_min, "출선 일정 생성");
    if cast_count > MAX_CAST_COUNT {
        warn!(cast_count, limit = MAX_CAST_COUNT, "출선 횟수가 상한을 넘어 잘라낸다");
    }
    timeline(cast_count, cast_duration_min, switch_gap_min).collect()
}

/// 출선 일정 요약.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineSummary {
    /// 마지막 출선 종료 시각(min)
    pub span_min: f64,
    pub casts_on_a: usize,
    pub casts_on_b: usize,
}

pub fn summarize_timeline(entries: &[CastTimelineEntry]) -> TimelineSummary {
    let casts_on_a = entries
        .iter()
        .filter(|e| e.tap_hole == TapHoleLabel::A)
        .count();
    TimelineSummary {
        span_min: entries.last().map(|e| e.end_min).unwrap_or(0.0),
        casts_on_a,
        casts_on_b: entries.len() - casts_on_a,
    }
}

/// 누적 생산량 계열의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulationPoint {
    pub time_min: f64,
    pub iron_ton: f64,
    pub slag_ton: f64,
    pub total_ton: f64,
}

impl AccumulationPoint {
    fn at(time_min: f64, rate_ton_per_min: f64, tap_ratio: f64) -> Self {
        let iron_ton = rate_ton_per_min * time_min;
        let slag_ton = if tap_ratio > 0.0 {
            iron_ton / tap_ratio
        } else {
            0.0
        };
        Self {
            time_min,
            iron_ton,
            slag_ton,
            total_ton: iron_ton + slag_ton,
        }
    }
}

/// `0, interval, 2·interval, …`에서 누적 용선/슬래그량을 샘플링한다.
///
/// 마지막 점은 `total_time` 이상이 되는 첫 시각이다. 간격이 0 이하이면 `t = 0` 한 점만 낸다.
/// 간격 수가 `MAX_SERIES_STEPS`를 넘으면 그 지점에서 잘라낸다.
pub fn cumulative_series(
    rate_ton_per_min: f64,
    tap_ratio: f64,
    interval_min: f64,
    total_time_min: f64,
) -> Vec<AccumulationPoint> {
    let steps = if interval_min > 0.0 && total_time_min > 0.0 {
        let wanted = (total_time_min / interval_min).ceil();
        if wanted.is_finite() && wanted <= MAX_SERIES_STEPS as f64 {
            wanted as usize
        } else {
            warn!(
                interval_min,
                total_time_min,
                limit = MAX_SERIES_STEPS,
                "샘플 수가 상한을 넘어 잘라낸다"
            );
            MAX_SERIES_STEPS
        }
    } else {
        debug!(interval_min, total_time_min, "샘플 간격 또는 총 시간이 0 이하");
        0
    };
    (0..=steps)
        .map(|k| AccumulationPoint::at(k as f64 * interval_min, rate_ton_per_min, tap_ratio))
        .collect()
}
