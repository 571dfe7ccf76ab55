//! A/B 출선 일정 및 누적 계열 테스트.
use taphole_casting_toolbox::casting::scheduler::{
    build_timeline, cumulative_series, summarize_timeline, timeline, TapHoleLabel,
    MAX_CAST_COUNT, MAX_SERIES_STEPS,
};

#[test]
fn nine_casts_alternate_starting_with_a() {
    let entries = build_timeline(9, 270.0, 12.0);
    assert_eq!(entries.len(), 9);
    let labels: String = entries.iter().map(|e| e.tap_hole.to_string()).collect();
    assert_eq!(labels, "ABABABABA");
    assert_eq!(entries[0].cast_index, 1);
    assert_eq!(entries[8].cast_index, 9);
}

#[test]
fn start_times_follow_recurrence() {
    let entries = build_timeline(9, 270.0, 12.0);
    assert_eq!(entries[0].start_min, 0.0);
    assert_eq!(entries[1].start_min, 282.0);
    for pair in entries.windows(2) {
        assert_eq!(pair[1].start_min, pair[0].end_min + 12.0);
    }
    for e in &entries {
        assert_eq!(e.end_min, e.start_min + 270.0);
    }
    // 9번째: 시작 8 × 282 = 2256, 종료 9 × 282 - 12 = 2526
    assert_eq!(entries[8].start_min, 2256.0);
    assert_eq!(entries[8].end_min, 9.0 * (270.0 + 12.0) - 12.0);
}

#[test]
fn empty_and_single_timelines() {
    assert!(build_timeline(0, 270.0, 12.0).is_empty());
    let single = build_timeline(1, 270.0, 12.0);
    assert_eq!(single[0].tap_hole, TapHoleLabel::A);
}

#[test]
fn lazy_timeline_matches_materialized() {
    let lazy: Vec<_> = timeline(6, 274.0, 15.0).collect();
    assert_eq!(lazy, build_timeline(6, 274.0, 15.0));
    assert_eq!(build_timeline(6, 274.0, 15.0), build_timeline(6, 274.0, 15.0));
}

#[test]
fn summary_counts_labels() {
    let summary = summarize_timeline(&build_timeline(9, 270.0, 12.0));
    assert_eq!(summary.casts_on_a, 5);
    assert_eq!(summary.casts_on_b, 4);
    assert_eq!(summary.span_min, 2526.0);
    assert_eq!(summarize_timeline(&[]).span_min, 0.0);
}

#[test]
fn cumulative_series_full_day() {
    let series = cumulative_series(9.0, 2.25, 60.0, 1440.0);
    assert_eq!(series.len(), 25);
    assert_eq!(series[0].time_min, 0.0);
    assert_eq!(series[0].total_ton, 0.0);
    let last = series.last().expect("last point");
    assert_eq!(last.time_min, 1440.0);
    assert_eq!(last.iron_ton, 12_960.0);
    assert_eq!(last.slag_ton, 5_760.0);
    assert_eq!(last.total_ton, 18_720.0);
}

#[test]
fn cumulative_series_covers_partial_step() {
    let series = cumulative_series(9.0, 2.25, 60.0, 100.0);
    let times: Vec<f64> = series.iter().map(|p| p.time_min).collect();
    assert_eq!(times, vec![0.0, 60.0, 120.0]);
}

#[test]
fn cumulative_series_guards_ratio_and_interval() {
    let no_slag = cumulative_series(9.0, 0.0, 60.0, 120.0);
    assert!(no_slag.iter().all(|p| p.slag_ton == 0.0));
    assert_eq!(no_slag[2].total_ton, no_slag[2].iron_ton);

    let degenerate = cumulative_series(9.0, 2.25, 0.0, 1440.0);
    assert_eq!(degenerate.len(), 1);
    assert_eq!(degenerate[0].total_ton, 0.0);
}

#[test]
fn huge_cast_count_is_truncated() {
    let entries = build_timeline(1e30 as usize, 270.0, 12.0);
    assert_eq!(entries.len(), MAX_CAST_COUNT);
    assert_eq!(entries[0].tap_hole, TapHoleLabel::A);
    let last = entries.last().expect("last entry");
    assert_eq!(last.cast_index, MAX_CAST_COUNT);
    assert_eq!(timeline(usize::MAX, 270.0, 12.0).count(), MAX_CAST_COUNT);
}

#[test]
fn huge_sample_count_is_truncated() {
    let series = cumulative_series(9.0, 2.25, 1e-300, 1e300);
    assert_eq!(series.len(), MAX_SERIES_STEPS + 1);
    assert_eq!(series[0].time_min, 0.0);
    assert!(series.iter().all(|p| p.total_ton.is_finite()));

    let capped = cumulative_series(9.0, 2.25, 1.0, f64::MAX);
    assert_eq!(capped.len(), MAX_SERIES_STEPS + 1);
}
