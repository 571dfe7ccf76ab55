use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::casting::{HoldupPolicy, SlagBasis};

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 현장 프로파일. 계산 입력이 비었을 때 쓰는 기본값을 한곳에 모은다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantProfile {
    /// 출선구 개수
    pub num_tapholes: u32,
    /// 상시 사용 출선구
    pub active_tapholes: u32,
    /// 하루 평균 출선 횟수
    pub casts_per_day: u32,
    /// 출선 비트경(mm)
    pub bit_diameter_mm: f64,
    /// 속도 계수 K(ton/min/mm²)
    pub speed_coefficient: f64,
    /// 1개 출선구 평균 출선시간(min)
    pub tap_time_min: f64,
    /// 관측 출선 속도(ton/min)
    pub tap_speed_ton_per_min: f64,
    /// 1회 출선 배출량(ton)
    pub tap_amount_ton: f64,
    /// 출선 종료~다음 출선까지 대기(min)
    pub switch_gap_min: f64,
    /// 용선 생성 속도(ton/min)
    pub iron_rate_ton_per_min: f64,
    /// 출선비(용선:슬래그)
    pub tap_ratio: f64,
    /// 누적 계열 샘플 간격(min)
    pub series_interval_min: f64,
    /// 누적 계열 총 시간(min)
    pub series_total_min: f64,
}

impl Default for PlantProfile {
    fn default() -> Self {
        Self {
            num_tapholes: 4,
            active_tapholes: 2,
            casts_per_day: 9,
            bit_diameter_mm: 45.0,
            speed_coefficient: 0.0024,
            tap_time_min: 274.0,
            tap_speed_ton_per_min: 4.85,
            tap_amount_ton: 1358.0,
            switch_gap_min: 15.0,
            iron_rate_ton_per_min: 9.0,
            tap_ratio: 2.25,
            series_interval_min: 60.0,
            series_total_min: 1440.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드(ko/en). 없으면 시스템 로케일을 따른다
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub plant: PlantProfile,
    pub holdup: HoldupPolicy,
    /// 저선량 계산의 슬래그량 기준
    pub slag_basis: SlagBasis,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일을 생성했다");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let cfg = load_or_default(&path).expect("load");
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_policy_and_overrides_survive_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.language = Some("en".into());
        cfg.holdup = HoldupPolicy::split();
        cfg.slag_basis = SlagBasis::Tfe;
        cfg.plant.speed_coefficient = 0.0026;
        cfg.save(&path).expect("save");

        let loaded = load_or_default(&path).expect("reload");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[plant]\ncasts_per_day = 11\n").expect("write");
        let cfg = load_or_default(&path).expect("load");
        assert_eq!(cfg.plant.casts_per_day, 11);
        assert_eq!(cfg.plant.tap_amount_ton, 1358.0);
        assert_eq!(cfg.holdup, HoldupPolicy::combined());
        assert_eq!(cfg.slag_basis, SlagBasis::TapRatio);
    }
}
