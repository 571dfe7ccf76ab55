//! 명령행 인자 정의. 생략한 값은 설정 파일의 현장 프로파일로 채운다.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::casting::{FollowDelayPolicy, HoldupPolicy, SlagBasis};
use crate::config::DEFAULT_CONFIG_PATH;

/// 고로 출선 작업 계산기.
#[derive(Debug, Parser)]
#[command(name = "taphole_casting_toolbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// UI 언어(ko, en, auto)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// 언어팩 디렉터리
    #[arg(long, global = true, default_value = "locales")]
    pub locales: PathBuf,

    /// 결과를 JSON으로 출력
    #[arg(long, global = true)]
    pub json: bool,

    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 생략하면 대화형 메뉴를 실행한다
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 비트경과 K로 출선 속도·시간을 계산한다.
    Speed {
        /// 출선 비트경(mm)
        #[arg(short, long)]
        diameter: Option<f64>,
        /// 속도 계수 K(ton/min/mm²)
        #[arg(short, long)]
        k: Option<f64>,
        /// 1회 배출량(ton)
        #[arg(short, long)]
        amount: Option<f64>,
    },

    /// 관측 출선 속도로부터 K를 역산한다.
    InverseK {
        /// 관측 출선 속도(ton/min)
        #[arg(short, long)]
        speed: Option<f64>,
        #[arg(short, long)]
        diameter: Option<f64>,
    },

    /// 배출량과 속도로 출선 시간을 계산한다.
    Duration {
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        speed: Option<f64>,
    },

    /// 두 출선구 동시 출선의 합산 속도와 개공 지연을 계산한다.
    Dual {
        #[command(flatten)]
        dual: DualArgs,
        #[arg(short, long)]
        k: Option<f64>,
        #[arg(short, long)]
        amount: Option<f64>,
    },

    /// 슬래그량, 노내 저선량, 비트경 권고를 계산한다.
    Residual {
        #[command(flatten)]
        production: ProductionArgs,
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// 저선량에 쓰는 슬래그량 기준
        #[arg(long, value_enum)]
        slag_basis: Option<SlagBasisArg>,
    },

    /// Ore/Coke 비에 따른 회수율을 계산한다.
    Recovery {
        #[arg(long)]
        ore_coke: f64,
        #[arg(long, default_value_t = 0.0)]
        reduction_ratio: f64,
    },

    /// 조업지수 점수와 조업 권고를 계산한다.
    Score {
        #[command(flatten)]
        indices: IndicesArgs,
        /// 출선 작업 시간 예측에 쓰는 Ore/Coke 비
        #[arg(long, default_value_t = 0.0)]
        ore_coke: f64,
        #[arg(long, default_value_t = 0.0)]
        reduction_ratio: f64,
    },

    /// A/B 교대 출선 일정을 만든다.
    Timeline {
        #[arg(short, long)]
        casts: Option<u32>,
        /// 1회 출선시간(min)
        #[arg(short, long)]
        duration: Option<f64>,
        /// 전환 간격(min)
        #[arg(short, long)]
        gap: Option<f64>,
    },

    /// 시간별 누적 용선/슬래그량 계열을 만든다.
    Series {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// 전체 계산을 한 번에 수행한다.
    Report {
        #[arg(short, long)]
        diameter: Option<f64>,
        #[arg(short, long)]
        k: Option<f64>,
        #[arg(short, long)]
        amount: Option<f64>,
        /// 지정하면 2출선구 동시 출선 계획도 계산한다
        #[arg(long)]
        follow_diameter: Option<f64>,
        #[arg(long, value_enum, default_value_t = FollowArg::Balanced)]
        follow: FollowArg,
        #[command(flatten)]
        production: ProductionArgs,
        #[command(flatten)]
        indices: IndicesArgs,
        #[arg(long, default_value_t = 0.0)]
        reduction_ratio: f64,
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        #[arg(long, value_enum)]
        slag_basis: Option<SlagBasisArg>,
        #[arg(long)]
        casts: Option<u32>,
        #[arg(long)]
        gap: Option<f64>,
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// 번호 메뉴로 값을 입력받아 계산한다.
    Interactive,
}

#[derive(Debug, Clone, Args)]
pub struct DualArgs {
    /// 선행 출선구 비트경(mm)
    #[arg(long)]
    pub lead_diameter: Option<f64>,
    /// 후행 출선구 비트경(mm)
    #[arg(long)]
    pub follow_diameter: Option<f64>,
    #[arg(long, value_enum, default_value_t = FollowArg::Balanced)]
    pub follow: FollowArg,
}

#[derive(Debug, Clone, Args)]
pub struct ProductionArgs {
    /// 일일생산량(ton)
    #[arg(long, default_value_t = 0.0)]
    pub daily_production: f64,
    #[arg(long, default_value_t = 0.0)]
    pub ore_coke: f64,
    /// 출선비(용선:슬래그)
    #[arg(long)]
    pub tap_ratio: Option<f64>,
    /// T.Fe(%)
    #[arg(long, default_value_t = 0.0)]
    pub tfe: f64,
}

#[derive(Debug, Clone, Args)]
pub struct IndicesArgs {
    /// 풍량(Nm³/min)
    #[arg(long, default_value_t = 0.0)]
    pub air_flow: f64,
    /// 노정압(kg/cm²)
    #[arg(long, default_value_t = 0.0)]
    pub furnace_pressure: f64,
    /// 산소부화량(Nm³/hr)
    #[arg(long, default_value_t = 0.0)]
    pub oxygen_injection: f64,
    /// 원료 입도(mm)
    #[arg(long, default_value_t = 0.0)]
    pub granulation: f64,
    /// 고로 수명(년)
    #[arg(long, default_value_t = 0.0)]
    pub lifetime: f64,
}

#[derive(Debug, Clone, Args)]
pub struct SeriesArgs {
    /// 용선 생성 속도(ton/min)
    #[arg(long)]
    pub iron_rate: Option<f64>,
    /// 누적 계열의 출선비. 생략하면 현장 프로파일 값
    #[arg(long)]
    pub series_ratio: Option<f64>,
    /// 샘플 간격(min)
    #[arg(long)]
    pub interval: Option<f64>,
    /// 총 시간(min)
    #[arg(long)]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FollowArg {
    Immediate,
    Balanced,
}

impl From<FollowArg> for FollowDelayPolicy {
    fn from(value: FollowArg) -> Self {
        match value {
            FollowArg::Immediate => FollowDelayPolicy::Immediate,
            FollowArg::Balanced => FollowDelayPolicy::Balanced,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// (용선+슬래그) × 0.05
    Combined,
    /// 용선 × 0.05 + 슬래그 × 0.02
    Split,
}

impl From<PolicyArg> for HoldupPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Combined => HoldupPolicy::combined(),
            PolicyArg::Split => HoldupPolicy::split(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SlagBasisArg {
    /// 고로 출력 / 출선비
    TapRatio,
    /// 일일생산량 × (1 - T.Fe/100)
    Tfe,
}

impl From<SlagBasisArg> for SlagBasis {
    fn from(value: SlagBasisArg) -> Self {
        match value {
            SlagBasisArg::TapRatio => SlagBasis::TapRatio,
            SlagBasisArg::Tfe => SlagBasis::Tfe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("taphole_casting_toolbox").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("parse")
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(cli.locales, PathBuf::from("locales"));
        assert!(!cli.json && !cli.verbose);
    }

    #[test]
    fn omitted_speed_values_are_left_for_plant_defaults() {
        match parse(&["speed"]).command {
            Some(Command::Speed {
                diameter,
                k,
                amount,
            }) => {
                assert_eq!(diameter, None);
                assert_eq!(k, None);
                assert_eq!(amount, None);
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse(&["speed", "-d", "48", "-k", "0.0026"]).command {
            Some(Command::Speed { diameter, k, .. }) => {
                assert_eq!(diameter, Some(48.0));
                assert_eq!(k, Some(0.0026));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn residual_takes_policy_and_slag_basis() {
        let cli = parse(&[
            "--json",
            "residual",
            "--daily-production",
            "10000",
            "--ore-coke",
            "4.5",
            "--tfe",
            "58",
            "--policy",
            "split",
            "--slag-basis",
            "tfe",
        ]);
        assert!(cli.json);
        match cli.command {
            Some(Command::Residual {
                production,
                policy,
                slag_basis,
            }) => {
                assert_eq!(production.daily_production, 10_000.0);
                assert_eq!(production.tap_ratio, None);
                assert_eq!(policy.map(HoldupPolicy::from), Some(HoldupPolicy::split()));
                assert_eq!(slag_basis.map(SlagBasis::from), Some(SlagBasis::Tfe));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = parse(&["report", "--json", "--lang", "en", "-v", "--follow-diameter", "43"]);
        assert!(cli.json && cli.verbose);
        assert_eq!(cli.lang.as_deref(), Some("en"));
        match cli.command {
            Some(Command::Report {
                follow_diameter,
                follow,
                slag_basis,
                ..
            }) => {
                assert_eq!(follow_diameter, Some(43.0));
                assert_eq!(follow, FollowArg::Balanced);
                assert_eq!(slag_basis, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = Cli::try_parse_from(["taphole_casting_toolbox", "residual", "--policy", "half"]);
        assert!(err.is_err());
    }
}
