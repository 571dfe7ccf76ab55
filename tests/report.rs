//! 종합 계산 파이프라인 테스트.
use taphole_casting_toolbox::casting::recommendation::{BitBand, OperatingPosture};
use taphole_casting_toolbox::casting::{
    evaluate, CastingInput, FollowDelayPolicy, FurnaceState, HoldupPolicy, OperatingIndices,
    SlagBasis, TapHoleConfig,
};
use taphole_casting_toolbox::config::PlantProfile;
use taphole_casting_toolbox::logging;

fn field_input() -> CastingInput {
    let plant = PlantProfile::default();
    CastingInput {
        tap_hole: TapHoleConfig::new(plant.bit_diameter_mm, plant.speed_coefficient),
        follow_hole: None,
        follow_policy: FollowDelayPolicy::Balanced,
        tap_amount_ton: plant.tap_amount_ton,
        daily_production_ton: 100.0,
        tfe_percent: 58.0,
        reduction_ratio: 0.0,
        furnace: FurnaceState {
            iron_rate_ton_per_min: plant.iron_rate_ton_per_min,
            tap_ratio: plant.tap_ratio,
            ore_coke_ratio: 1.25,
            indices: OperatingIndices {
                air_flow: 300.0,
                furnace_pressure: 2.0,
                oxygen_injection: 100.0,
                raw_material_granulation: 20.0,
                furnace_lifetime_years: 8.0,
            },
        },
        holdup: HoldupPolicy::combined(),
        slag_basis: SlagBasis::TapRatio,
        casts_per_day: plant.casts_per_day,
        switch_gap_min: plant.switch_gap_min,
        series_interval_min: plant.series_interval_min,
        series_total_min: plant.series_total_min,
    }
}

#[test]
fn report_composes_all_stages() {
    logging::init_test();
    let input = field_input();
    let report = evaluate(&input);

    assert!((report.tap.speed_ton_per_min - 4.86).abs() < 1e-9);
    assert!((report.tap.duration_min - 1358.0 / 4.86).abs() < 1e-6);
    assert!(report.dual.is_none());

    // 100 × 1.25 × 0.8 = 100, 슬래그 100 / 2.25
    assert!((report.furnace_output_ton - 100.0).abs() < 1e-9);
    assert!((report.slag_ton - 100.0 / 2.25).abs() < 1e-9);
    assert!((report.slag_from_tfe_ton - 42.0).abs() < 1e-9);
    let expected_holdup = (100.0 + 100.0 / 2.25) * 0.05;
    assert!((report.residual.total_ton - expected_holdup).abs() < 1e-9);
    assert_eq!(report.bit.band, BitBand::Medium);

    assert_eq!(report.recovery_rate, 0.93);
    assert!((report.operating_score - 430.0).abs() < 1e-9);
    assert_eq!(report.posture, OperatingPosture::MidScore);
    assert!((report.daily_tap_output_ton - 12_222.0).abs() < 1e-9);

    assert_eq!(report.timeline.len(), 9);
    assert_eq!(report.timeline[1].start_min, report.timeline[0].end_min + 15.0);
    assert_eq!(report.timeline_summary.casts_on_a, 5);
    assert_eq!(report.series.len(), 25);
    assert_eq!(report.series[24].total_ton, 18_720.0);
}

#[test]
fn split_policy_changes_only_holdup() {
    let combined = evaluate(&field_input());
    let mut input = field_input();
    input.holdup = HoldupPolicy::split();
    let split = evaluate(&input);

    assert!(split.residual.total_ton < combined.residual.total_ton);
    assert_eq!(split.tap, combined.tap);
    assert_eq!(split.timeline, combined.timeline);
    assert_eq!(split.bit.band, BitBand::Medium);
}

#[test]
fn follow_hole_adds_dual_plan() {
    let mut input = field_input();
    input.follow_hole = Some(TapHoleConfig::new(43.0, input.tap_hole.speed_coefficient));
    let report = evaluate(&input);
    let plan = report.dual.expect("dual plan");
    assert!(plan.follow_duration_min > plan.lead_duration_min);
    assert!(plan.follow_delay_min >= 3.0);
    assert!(plan.combined_duration_min < plan.lead_duration_min);
}

#[test]
fn zero_speed_hole_does_not_fail() {
    let mut input = field_input();
    input.tap_hole = TapHoleConfig::new(0.0, 0.0);
    let report = evaluate(&input);
    assert_eq!(report.tap.duration_min, 0.0);
    assert!(report.timeline.iter().all(|e| e.end_min == e.start_min));
}

#[test]
fn report_is_idempotent_and_serializable() {
    let input = field_input();
    let a = evaluate(&input);
    let b = evaluate(&input);
    assert_eq!(a, b);

    let json = serde_json::to_value(&a).expect("json");
    assert_eq!(json["bit"]["band"], "MEDIUM");
    assert_eq!(json["timeline"][0]["tap_hole"], "A");
    assert_eq!(json["posture"], "MID_SCORE");
}

#[test]
fn tfe_slag_basis_matches_page_total() {
    // 10000 × 4.5 × 0.8 × 0.05 + 10000 × 0.42 × 0.02 = 1800 + 84
    let mut input = field_input();
    input.daily_production_ton = 10_000.0;
    input.tfe_percent = 58.0;
    input.furnace.ore_coke_ratio = 4.5;
    input.holdup = HoldupPolicy::split();
    input.slag_basis = SlagBasis::Tfe;
    let report = evaluate(&input);

    assert!((report.residual.iron_ton - 1800.0).abs() < 1e-9);
    assert!((report.residual.slag_ton - 84.0).abs() < 1e-9);
    assert!((report.residual.total_ton - 1884.0).abs() < 1e-9);
    assert_eq!(report.slag_basis, SlagBasis::Tfe);

    input.slag_basis = SlagBasis::TapRatio;
    let by_ratio = evaluate(&input);
    assert!((by_ratio.residual.slag_ton - 36_000.0 / 2.25 * 0.02).abs() < 1e-9);
    assert_eq!(by_ratio.slag_from_tfe_ton, report.slag_from_tfe_ton);
}
