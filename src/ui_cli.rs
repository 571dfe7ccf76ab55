use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::app::{
    self, AppError, CoefficientResult, RecoveryResult, ResidualResult, ScoreResult,
};
use crate::casting::{
    self, recommendation::OperatingPosture, AccumulationPoint, BitRecommendation,
    CastTimelineEntry, CastingInput, CastingReport, DualTapPlan, FurnaceState, OperatingIndices,
    ResidualMelt, TapEvent, TapHoleConfig,
};
use crate::cli::{DualArgs, FollowArg, ProductionArgs};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::units::{convert_tap_rate, format_clock, TapRateUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Speed,
    Dual,
    Residual,
    Timeline,
    Report,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_SPEED,
        keys::MAIN_MENU_DUAL,
        keys::MAIN_MENU_RESIDUAL,
        keys::MAIN_MENU_TIMELINE,
        keys::MAIN_MENU_REPORT,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(sel.as_deref()) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 메뉴 입력 한 줄을 해석한다. 입력이 닫혔으면(`None`) 종료로 본다.
pub fn parse_menu_choice(line: Option<&str>) -> Option<MenuChoice> {
    let Some(line) = line else {
        return Some(MenuChoice::Exit);
    };
    match line.trim() {
        "1" => Some(MenuChoice::Speed),
        "2" => Some(MenuChoice::Dual),
        "3" => Some(MenuChoice::Residual),
        "4" => Some(MenuChoice::Timeline),
        "5" => Some(MenuChoice::Report),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 대화형 메뉴 루프. 입력 기본값은 현장 프로파일에서 가져온다.
pub fn interactive(cfg: &Config, tr: &Translator) -> Result<(), AppError> {
    print_plant_profile(tr, cfg);
    loop {
        match main_menu(tr)? {
            MenuChoice::Speed => handle_speed(tr, cfg)?,
            MenuChoice::Dual => handle_dual(tr, cfg)?,
            MenuChoice::Residual => handle_residual(tr, cfg)?,
            MenuChoice::Timeline => handle_timeline(tr, cfg)?,
            MenuChoice::Report => handle_report(tr, cfg)?,
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

fn read_tap_hole(tr: &Translator, cfg: &Config) -> Result<TapHoleConfig, AppError> {
    let diameter = read_f64_or(tr, keys::PROMPT_DIAMETER, cfg.plant.bit_diameter_mm)?;
    let k = read_f64_or(tr, keys::PROMPT_K, cfg.plant.speed_coefficient)?;
    Ok(TapHoleConfig::new(diameter, k))
}

fn handle_speed(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let hole = read_tap_hole(tr, cfg)?;
    let amount = read_f64_or(tr, keys::PROMPT_TAP_AMOUNT, cfg.plant.tap_amount_ton)?;
    print_tap_event(tr, &hole.tap(amount));
    Ok(())
}

fn handle_dual(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let plant = &cfg.plant;
    let args = DualArgs {
        lead_diameter: Some(read_f64_or(tr, keys::PROMPT_DIAMETER, plant.bit_diameter_mm)?),
        follow_diameter: Some(read_f64_or(
            tr,
            keys::PROMPT_FOLLOW_DIAMETER,
            plant.bit_diameter_mm,
        )?),
        follow: FollowArg::Balanced,
    };
    let k = read_f64_or(tr, keys::PROMPT_K, plant.speed_coefficient)?;
    let amount = read_f64_or(tr, keys::PROMPT_TAP_AMOUNT, plant.tap_amount_ton)?;
    print_dual_plan(tr, &app::dual_plan(plant, &args, Some(k), amount));
    Ok(())
}

fn read_production(tr: &Translator, cfg: &Config) -> Result<ProductionArgs, AppError> {
    Ok(ProductionArgs {
        daily_production: read_f64_or(tr, keys::PROMPT_DAILY_PRODUCTION, 0.0)?,
        ore_coke: read_f64_or(tr, keys::PROMPT_ORE_COKE, 0.0)?,
        tap_ratio: Some(read_f64_or(tr, keys::PROMPT_TAP_RATIO, cfg.plant.tap_ratio)?),
        tfe: read_f64_or(tr, keys::PROMPT_TFE, 0.0)?,
    })
}

fn read_indices(tr: &Translator) -> Result<OperatingIndices, AppError> {
    Ok(OperatingIndices {
        air_flow: read_f64_or(tr, keys::PROMPT_AIR_FLOW, 0.0)?,
        furnace_pressure: read_f64_or(tr, keys::PROMPT_FURNACE_PRESSURE, 0.0)?,
        oxygen_injection: read_f64_or(tr, keys::PROMPT_OXYGEN, 0.0)?,
        raw_material_granulation: read_f64_or(tr, keys::PROMPT_GRANULATION, 0.0)?,
        furnace_lifetime_years: read_f64_or(tr, keys::PROMPT_LIFETIME, 0.0)?,
    })
}

fn handle_residual(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let production = read_production(tr, cfg)?;
    print_residual(
        tr,
        &app::residual(&cfg.plant, &production, cfg.holdup, cfg.slag_basis),
    );
    Ok(())
}

fn handle_timeline(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let plant = &cfg.plant;
    let casts: u32 = read_number_or(tr, keys::PROMPT_CAST_COUNT, plant.casts_per_day)?;
    let duration = read_f64_or(tr, keys::PROMPT_CAST_DURATION, plant.tap_time_min)?;
    let gap = read_f64_or(tr, keys::PROMPT_SWITCH_GAP, plant.switch_gap_min)?;
    let entries = casting::build_timeline(casts as usize, duration, gap);
    print_timeline(tr, &entries);
    Ok(())
}

fn handle_report(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let plant = &cfg.plant;
    let hole = read_tap_hole(tr, cfg)?;
    let amount = read_f64_or(tr, keys::PROMPT_TAP_AMOUNT, plant.tap_amount_ton)?;
    let production = read_production(tr, cfg)?;
    let reduction_ratio = read_f64_or(tr, keys::PROMPT_REDUCTION_RATIO, 0.0)?;
    let indices = read_indices(tr)?;
    let gap = read_f64_or(tr, keys::PROMPT_SWITCH_GAP, plant.switch_gap_min)?;
    let input = CastingInput {
        tap_hole: hole,
        follow_hole: None,
        follow_policy: Default::default(),
        tap_amount_ton: amount,
        daily_production_ton: production.daily_production,
        tfe_percent: production.tfe,
        reduction_ratio,
        furnace: FurnaceState {
            iron_rate_ton_per_min: plant.iron_rate_ton_per_min,
            tap_ratio: production.tap_ratio.unwrap_or(plant.tap_ratio),
            ore_coke_ratio: production.ore_coke,
            indices,
        },
        holdup: cfg.holdup,
        slag_basis: cfg.slag_basis,
        casts_per_day: plant.casts_per_day,
        switch_gap_min: gap,
        series_interval_min: plant.series_interval_min,
        series_total_min: plant.series_total_min,
    };
    print_report(tr, &casting::evaluate(&input));
    Ok(())
}

fn print_plant_profile(tr: &Translator, cfg: &Config) {
    let p = &cfg.plant;
    println!("[{}]", tr.t(keys::PLANT_PROFILE_HEADING));
    let rows = [
        (
            keys::PLANT_TAPHOLES,
            format!("{}/{}", p.active_tapholes, p.num_tapholes),
        ),
        (keys::PLANT_CASTS_PER_DAY, p.casts_per_day.to_string()),
        (keys::PROMPT_DIAMETER, format!("{:.0}", p.bit_diameter_mm)),
        (keys::PROMPT_K, format!("{:.4}", p.speed_coefficient)),
        (keys::PROMPT_CAST_DURATION, format!("{:.0}", p.tap_time_min)),
        (keys::PLANT_TAP_SPEED, format!("{:.2}", p.tap_speed_ton_per_min)),
        (keys::PROMPT_TAP_AMOUNT, format!("{:.0}", p.tap_amount_ton)),
        (keys::PROMPT_SWITCH_GAP, format!("{:.0}", p.switch_gap_min)),
    ];
    for (key, value) in rows {
        println!("- {}: {value}", tr.t(key));
    }
}

pub fn print_tap_event(tr: &Translator, event: &TapEvent) {
    let per_hour = convert_tap_rate(
        event.speed_ton_per_min,
        TapRateUnit::TonPerMinute,
        TapRateUnit::TonPerHour,
    );
    println!(
        "{} {:.2} ton/min ({:.1} ton/h)",
        tr.t(keys::RESULT_SPEED),
        event.speed_ton_per_min,
        per_hour
    );
    println!(
        "{} {:.1} min ({})",
        tr.t(keys::RESULT_DURATION),
        event.duration_min,
        format_clock(event.duration_min)
    );
}

pub fn print_coefficient(tr: &Translator, result: &CoefficientResult) {
    println!(
        "{} {:.6} ton/min/mm² ({:.2} ton/min @ {:.0} mm)",
        tr.t(keys::RESULT_K),
        result.speed_coefficient,
        result.speed_ton_per_min,
        result.diameter_mm
    );
}

pub fn print_dual_plan(tr: &Translator, plan: &DualTapPlan) {
    println!(
        "{} {:.2} ton/min ({:.2} + {:.2})",
        tr.t(keys::RESULT_TOTAL_SPEED),
        plan.total_speed_ton_per_min,
        plan.lead_speed_ton_per_min,
        plan.follow_speed_ton_per_min
    );
    println!(
        "{} {:.1} / {:.1} min",
        tr.t(keys::RESULT_LEAD_FOLLOW_DURATION),
        plan.lead_duration_min,
        plan.follow_duration_min
    );
    println!(
        "{} {:.1} min",
        tr.t(keys::RESULT_COMBINED_DURATION),
        plan.combined_duration_min
    );
    println!(
        "{} {:.1} min",
        tr.t(keys::RESULT_FOLLOW_DELAY),
        plan.follow_delay_min
    );
}

pub fn print_residual(tr: &Translator, result: &ResidualResult) {
    print_holdup(
        tr,
        result.furnace_output_ton,
        result.slag_ton,
        result.slag_from_tfe_ton,
        &result.residual,
        &result.bit,
    );
}

fn print_holdup(
    tr: &Translator,
    furnace_output_ton: f64,
    slag_ton: f64,
    slag_from_tfe_ton: f64,
    residual: &ResidualMelt,
    bit: &BitRecommendation,
) {
    let rows = [
        (keys::RESULT_FURNACE_OUTPUT, furnace_output_ton),
        (keys::RESULT_SLAG, slag_ton),
        (keys::RESULT_SLAG_TFE, slag_from_tfe_ton),
        (keys::RESULT_IRON_HOLDUP, residual.iron_ton),
        (keys::RESULT_SLAG_HOLDUP, residual.slag_ton),
        (keys::RESULT_TOTAL_HOLDUP, residual.total_ton),
    ];
    for (key, value) in rows {
        println!("{} {:.2} ton", tr.t(key), value);
    }
    println!(
        "{} {:.0} mm ({:?})",
        tr.t(keys::RESULT_BIT),
        bit.diameter_mm,
        bit.band
    );
    println!("  {}", tr.t_or(bit.band.guidance_key(), bit.band.guidance()));
}

pub fn print_recovery(tr: &Translator, result: &RecoveryResult) {
    print_recovery_rate(tr, result.recovery_rate);
}

fn print_recovery_rate(tr: &Translator, recovery_rate: f64) {
    println!("{} {:.1}%", tr.t(keys::RESULT_RECOVERY), recovery_rate * 100.0);
}

pub fn print_score(tr: &Translator, result: &ScoreResult) {
    print_posture(
        tr,
        result.score,
        result.posture,
        result.predicted_casting_time_min,
    );
}

fn print_posture(
    tr: &Translator,
    score: f64,
    posture: OperatingPosture,
    predicted_casting_time_min: f64,
) {
    println!("{} {:.2}", tr.t(keys::RESULT_SCORE), score);
    println!(
        "{} {:.2} min",
        tr.t(keys::RESULT_CASTING_TIME),
        predicted_casting_time_min
    );
    println!("  {}", tr.t_or(posture.guidance_key(), posture.guidance()));
}

pub fn print_timeline(tr: &Translator, entries: &[CastTimelineEntry]) {
    println!("{}", tr.t(keys::TABLE_TIMELINE_HEADER));
    for e in entries {
        println!(
            "{:>4}  {:^6}  {:<12}  {}",
            e.cast_index,
            e.tap_hole.to_string(),
            format_clock(e.start_min),
            format_clock(e.end_min)
        );
    }
    let summary = casting::summarize_timeline(entries);
    println!(
        "{} {:.0} min ({}/{})",
        tr.t(keys::RESULT_TIMELINE_SPAN),
        summary.span_min,
        summary.casts_on_a,
        summary.casts_on_b
    );
}

pub fn print_series(tr: &Translator, points: &[AccumulationPoint]) {
    println!("{}", tr.t(keys::TABLE_SERIES_HEADER));
    for p in points {
        println!(
            "{:>9.0}   {:>14.1}  {:>16.1}  {:>9.1}",
            p.time_min, p.iron_ton, p.slag_ton, p.total_ton
        );
    }
}

pub fn print_report(tr: &Translator, report: &CastingReport) {
    print_tap_event(tr, &report.tap);
    if let Some(plan) = &report.dual {
        print_dual_plan(tr, plan);
    }
    print_holdup(
        tr,
        report.furnace_output_ton,
        report.slag_ton,
        report.slag_from_tfe_ton,
        &report.residual,
        &report.bit,
    );
    print_recovery_rate(tr, report.recovery_rate);
    print_posture(
        tr,
        report.operating_score,
        report.posture,
        report.predicted_casting_time_min,
    );
    println!(
        "{} {:.0} ton",
        tr.t(keys::RESULT_DAILY_OUTPUT),
        report.daily_tap_output_ton
    );
    println!();
    print_timeline(tr, &report.timeline);
    println!();
    print_series(tr, &report.series);
}

fn read_line(prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_line_from(&mut io::stdin().lock())
}

/// 한 줄을 읽는다. 입력 끝(EOF)이면 `None`.
pub fn read_line_from<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// 입력 한 줄을 숫자로 해석한다. 빈 줄이나 입력 끝이면 기본값, 해석 실패면 `None`.
pub fn parse_number_or<T: FromStr>(line: Option<&str>, default: T) -> Option<T> {
    match line.map(str::trim) {
        None | Some("") => Some(default),
        Some(s) => s.parse().ok(),
    }
}

fn read_f64_or(tr: &Translator, label_key: &str, default: f64) -> Result<f64, AppError> {
    read_number_or(tr, label_key, default)
}

/// 숫자를 입력받는다. 빈 입력이면 기본값을 쓴다.
fn read_number_or<T: FromStr + Display + Copy>(
    tr: &Translator,
    label_key: &str,
    default: T,
) -> Result<T, AppError> {
    loop {
        let line = read_line(&format!("{} [{default}]: ", tr.t(label_key)))?;
        match parse_number_or(line.as_deref(), default) {
            Some(v) => return Ok(v),
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
