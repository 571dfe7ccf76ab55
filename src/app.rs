use serde::Serialize;
use thiserror::Error;

use crate::casting::{
    self, recommendation::OperatingPosture, BitRecommendation, CastingInput, FurnaceState,
    HoldupPolicy, OperatingIndices, ResidualMelt, SlagBasis, TapEvent, TapHoleConfig,
};
use crate::cli::{Command, DualArgs, IndicesArgs, ProductionArgs, SeriesArgs};
use crate::config::{Config, PlantProfile};
use crate::i18n::Translator;
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// K 역산 결과.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CoefficientResult {
    pub speed_ton_per_min: f64,
    pub diameter_mm: f64,
    pub speed_coefficient: f64,
}

/// 저선량 추정 결과.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResidualResult {
    pub furnace_output_ton: f64,
    pub slag_ton: f64,
    pub slag_from_tfe_ton: f64,
    pub holdup: HoldupPolicy,
    pub slag_basis: SlagBasis,
    pub residual: ResidualMelt,
    pub bit: BitRecommendation,
    pub guidance: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecoveryResult {
    pub ore_coke_ratio: f64,
    pub reduction_ratio: f64,
    pub recovery_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub posture: OperatingPosture,
    pub predicted_casting_time_min: f64,
    pub guidance: &'static str,
}

/// 출력 방식. JSON이면 결과 레코드를 그대로 직렬화한다.
#[derive(Debug, Clone, Copy)]
pub struct Output<'a> {
    pub json: bool,
    pub tr: &'a Translator,
}

impl Output<'_> {
    fn emit<T: Serialize>(
        &self,
        value: &T,
        render: impl FnOnce(&Translator, &T),
    ) -> Result<(), AppError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            render(self.tr, value);
        }
        Ok(())
    }
}

/// 하위 명령 하나를 실행한다. 명령이 없으면 대화형 메뉴를 띄운다.
pub fn run(command: Option<Command>, config: &Config, out: Output<'_>) -> Result<(), AppError> {
    let plant = &config.plant;
    match command.unwrap_or(Command::Interactive) {
        Command::Speed { diameter, k, amount } => {
            let hole = tap_hole(plant, diameter, k);
            let event = hole.tap(amount.unwrap_or(plant.tap_amount_ton));
            out.emit(&event, ui_cli::print_tap_event)
        }
        Command::InverseK { speed, diameter } => {
            let speed_ton_per_min = speed.unwrap_or(plant.tap_speed_ton_per_min);
            let diameter_mm = diameter.unwrap_or(plant.bit_diameter_mm);
            let result = CoefficientResult {
                speed_ton_per_min,
                diameter_mm,
                speed_coefficient: casting::inverse_coefficient(speed_ton_per_min, diameter_mm),
            };
            out.emit(&result, ui_cli::print_coefficient)
        }
        Command::Duration { amount, speed } => {
            let event = TapEvent::new(
                amount.unwrap_or(plant.tap_amount_ton),
                speed.unwrap_or(plant.tap_speed_ton_per_min),
            );
            out.emit(&event, ui_cli::print_tap_event)
        }
        Command::Dual { dual, k, amount } => {
            let plan = dual_plan(plant, &dual, k, amount.unwrap_or(plant.tap_amount_ton));
            out.emit(&plan, ui_cli::print_dual_plan)
        }
        Command::Residual {
            production,
            policy,
            slag_basis,
        } => {
            let holdup = policy.map(HoldupPolicy::from).unwrap_or(config.holdup);
            let slag_basis = slag_basis.map(SlagBasis::from).unwrap_or(config.slag_basis);
            let result = residual(plant, &production, holdup, slag_basis);
            out.emit(&result, ui_cli::print_residual)
        }
        Command::Recovery {
            ore_coke,
            reduction_ratio,
        } => {
            let result = RecoveryResult {
                ore_coke_ratio: ore_coke,
                reduction_ratio,
                recovery_rate: casting::recovery_rate(ore_coke, reduction_ratio),
            };
            out.emit(&result, ui_cli::print_recovery)
        }
        Command::Score {
            indices,
            ore_coke,
            reduction_ratio,
        } => {
            let result = score(&operating_indices(&indices), ore_coke, reduction_ratio);
            out.emit(&result, ui_cli::print_score)
        }
        Command::Timeline {
            casts,
            duration,
            gap,
        } => {
            let entries = casting::build_timeline(
                casts.unwrap_or(plant.casts_per_day) as usize,
                duration.unwrap_or(plant.tap_time_min),
                gap.unwrap_or(plant.switch_gap_min),
            );
            out.emit(&entries, |tr, e| ui_cli::print_timeline(tr, e))
        }
        Command::Series { series } => {
            let points = series_points(plant, &series);
            out.emit(&points, |tr, p| ui_cli::print_series(tr, p))
        }
        Command::Report {
            diameter,
            k,
            amount,
            follow_diameter,
            follow,
            production,
            indices,
            reduction_ratio,
            policy,
            slag_basis,
            casts,
            gap,
            series,
        } => {
            let hole = tap_hole(plant, diameter, k);
            let input = CastingInput {
                tap_hole: hole,
                follow_hole: follow_diameter
                    .map(|d| TapHoleConfig::new(d, hole.speed_coefficient)),
                follow_policy: follow.into(),
                tap_amount_ton: amount.unwrap_or(plant.tap_amount_ton),
                daily_production_ton: production.daily_production,
                tfe_percent: production.tfe,
                reduction_ratio,
                furnace: FurnaceState {
                    iron_rate_ton_per_min: series
                        .iron_rate
                        .unwrap_or(plant.iron_rate_ton_per_min),
                    tap_ratio: production
                        .tap_ratio
                        .or(series.series_ratio)
                        .unwrap_or(plant.tap_ratio),
                    ore_coke_ratio: production.ore_coke,
                    indices: operating_indices(&indices),
                },
                holdup: policy.map(HoldupPolicy::from).unwrap_or(config.holdup),
                slag_basis: slag_basis.map(SlagBasis::from).unwrap_or(config.slag_basis),
                casts_per_day: casts.unwrap_or(plant.casts_per_day),
                switch_gap_min: gap.unwrap_or(plant.switch_gap_min),
                series_interval_min: series.interval.unwrap_or(plant.series_interval_min),
                series_total_min: series.total.unwrap_or(plant.series_total_min),
            };
            let report = casting::evaluate(&input);
            out.emit(&report, ui_cli::print_report)
        }
        Command::Interactive => ui_cli::interactive(config, out.tr),
    }
}

pub fn tap_hole(plant: &PlantProfile, diameter: Option<f64>, k: Option<f64>) -> TapHoleConfig {
    TapHoleConfig::new(
        diameter.unwrap_or(plant.bit_diameter_mm),
        k.unwrap_or(plant.speed_coefficient),
    )
}

pub fn dual_plan(
    plant: &PlantProfile,
    args: &DualArgs,
    k: Option<f64>,
    amount_ton: f64,
) -> casting::DualTapPlan {
    let lead = tap_hole(plant, args.lead_diameter, k);
    let follow = tap_hole(plant, args.follow_diameter, k);
    casting::plan_dual_tap(lead, follow, amount_ton, args.follow.into())
}

pub fn residual(
    plant: &PlantProfile,
    args: &ProductionArgs,
    holdup: HoldupPolicy,
    slag_basis: SlagBasis,
) -> ResidualResult {
    let furnace_output_ton = casting::blast_furnace_output(args.daily_production, args.ore_coke);
    let slag_ton = casting::slag_amount(
        furnace_output_ton,
        args.tap_ratio.unwrap_or(plant.tap_ratio),
    );
    let slag_from_tfe_ton = casting::slag_from_tfe(args.daily_production, args.tfe);
    let residual = holdup.breakdown(
        furnace_output_ton,
        slag_basis.select(slag_ton, slag_from_tfe_ton),
    );
    let bit = casting::recommend_bit_diameter(residual.total_ton);
    ResidualResult {
        furnace_output_ton,
        slag_ton,
        slag_from_tfe_ton,
        holdup,
        slag_basis,
        residual,
        bit,
        guidance: bit.band.guidance(),
    }
}

pub fn score(
    indices: &OperatingIndices,
    ore_coke_ratio: f64,
    reduction_ratio: f64,
) -> ScoreResult {
    let score = casting::operating_score(indices, reduction_ratio);
    let posture = casting::recommend_operating_posture(score);
    ScoreResult {
        score,
        posture,
        predicted_casting_time_min: casting::predict_casting_time(indices, ore_coke_ratio),
        guidance: posture.guidance(),
    }
}

pub fn operating_indices(args: &IndicesArgs) -> OperatingIndices {
    OperatingIndices {
        air_flow: args.air_flow,
        furnace_pressure: args.furnace_pressure,
        oxygen_injection: args.oxygen_injection,
        raw_material_granulation: args.granulation,
        furnace_lifetime_years: args.lifetime,
    }
}

pub fn series_points(plant: &PlantProfile, args: &SeriesArgs) -> Vec<casting::AccumulationPoint> {
    casting::cumulative_series(
        args.iron_rate.unwrap_or(plant.iron_rate_ton_per_min),
        args.series_ratio.unwrap_or(plant.tap_ratio),
        args.interval.unwrap_or(plant.series_interval_min),
        args.total.unwrap_or(plant.series_total_min),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casting::FollowDelayPolicy;
    use crate::cli::FollowArg;

    fn production(tap_ratio: Option<f64>) -> ProductionArgs {
        ProductionArgs {
            daily_production: 10_000.0,
            ore_coke: 4.5,
            tap_ratio,
            tfe: 58.0,
        }
    }

    #[test]
    fn tap_hole_falls_back_to_plant_profile() {
        let plant = PlantProfile::default();
        assert_eq!(tap_hole(&plant, None, None), TapHoleConfig::new(45.0, 0.0024));
        assert_eq!(
            tap_hole(&plant, Some(48.0), None),
            TapHoleConfig::new(48.0, 0.0024)
        );
    }

    #[test]
    fn residual_uses_plant_tap_ratio_when_omitted() {
        let plant = PlantProfile::default();
        let result = residual(
            &plant,
            &production(None),
            HoldupPolicy::combined(),
            SlagBasis::TapRatio,
        );
        assert!((result.furnace_output_ton - 36_000.0).abs() < 1e-9);
        assert!((result.slag_ton - 16_000.0).abs() < 1e-9);
        assert!((result.residual.total_ton - 2_600.0).abs() < 1e-9);

        let explicit = residual(
            &plant,
            &production(Some(4.0)),
            HoldupPolicy::combined(),
            SlagBasis::TapRatio,
        );
        assert!((explicit.slag_ton - 9_000.0).abs() < 1e-9);
    }

    #[test]
    fn residual_with_tfe_basis_and_split_policy() {
        let result = residual(
            &PlantProfile::default(),
            &production(None),
            HoldupPolicy::split(),
            SlagBasis::Tfe,
        );
        assert!((result.residual.total_ton - 1_884.0).abs() < 1e-9);
        assert_eq!(result.guidance, result.bit.band.guidance());

        let json = serde_json::to_value(result).expect("json");
        assert_eq!(json["slag_basis"], "tfe");
        assert_eq!(json["holdup"]["kind"], "split");
        assert_eq!(json["bit"]["band"], "HIGH");
    }

    #[test]
    fn score_combines_posture_and_casting_time() {
        let indices = operating_indices(&IndicesArgs {
            air_flow: 300.0,
            furnace_pressure: 2.0,
            oxygen_injection: 100.0,
            granulation: 20.0,
            lifetime: 8.0,
        });
        let result = score(&indices, 1.0, 0.0);
        assert!((result.score - 430.0).abs() < 1e-9);
        assert_eq!(result.posture, OperatingPosture::MidScore);
        assert!((result.predicted_casting_time_min - 430.0 / 2.1).abs() < 1e-9);
    }

    #[test]
    fn series_points_default_to_a_full_day() {
        let plant = PlantProfile::default();
        let args = SeriesArgs {
            iron_rate: None,
            series_ratio: None,
            interval: None,
            total: None,
        };
        let points = series_points(&plant, &args);
        assert_eq!(points.len(), 25);
        assert_eq!(points[24].total_ton, 18_720.0);

        let two_hourly = series_points(
            &plant,
            &SeriesArgs {
                interval: Some(120.0),
                ..args
            },
        );
        assert_eq!(two_hourly.len(), 13);
    }

    #[test]
    fn dual_plan_defaults_both_holes_to_plant_bit() {
        let plant = PlantProfile::default();
        let args = DualArgs {
            lead_diameter: None,
            follow_diameter: None,
            follow: FollowArg::Balanced,
        };
        let plan = dual_plan(&plant, &args, None, plant.tap_amount_ton);
        assert!((plan.total_speed_ton_per_min - 2.0 * 4.86).abs() < 1e-9);
        assert_eq!(plan.follow_delay_min, 3.0);

        let immediate = DualArgs {
            follow: FollowArg::Immediate,
            ..args
        };
        let plan = dual_plan(&plant, &immediate, None, plant.tap_amount_ton);
        assert_eq!(plan.follow_delay_min, 0.0);
        assert_eq!(FollowDelayPolicy::from(FollowArg::Immediate), FollowDelayPolicy::Immediate);
    }

    #[test]
    fn json_output_runs_without_prompting() {
        let tr = Translator::new("en");
        let out = Output { json: true, tr: &tr };
        let command = Command::Recovery {
            ore_coke: 4.5,
            reduction_ratio: 0.0,
        };
        assert!(run(Some(command), &Config::default(), out).is_ok());

        let command = Command::Timeline {
            casts: Some(3),
            duration: None,
            gap: None,
        };
        assert!(run(Some(command), &Config::default(), out).is_ok());
    }
}
