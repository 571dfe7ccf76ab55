//! 임계값 기반 권고 테이블.
//!
//! 모든 테이블은 상한을 오름차순으로 나열한 구간 목록이며 선형 탐색한다.
//! 경계 포함 여부는 구간마다 명시한다.

use serde::{Deserialize, Serialize};

/// 구간 상한의 포함 여부.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// `x < upper` 이면 해당 구간
    Exclusive,
    /// `x <= upper` 이면 해당 구간
    Inclusive,
}

/// 상한 하나와 그 구간의 값.
#[derive(Debug, Clone, Copy)]
pub struct Band<T: Copy + 'static> {
    pub upper: f64,
    pub boundary: Boundary,
    pub value: T,
}

impl<T: Copy + 'static> Band<T> {
    /// `x < upper` 구간
    pub const fn below(upper: f64, value: T) -> Self {
        Self {
            upper,
            boundary: Boundary::Exclusive,
            value,
        }
    }

    /// `x <= upper` 구간
    pub const fn at_most(upper: f64, value: T) -> Self {
        Self {
            upper,
            boundary: Boundary::Inclusive,
            value,
        }
    }

    fn contains(&self, x: f64) -> bool {
        match self.boundary {
            Boundary::Exclusive => x < self.upper,
            Boundary::Inclusive => x <= self.upper,
        }
    }
}

/// 오름차순 구간 목록으로 표현한 계단 함수.
#[derive(Debug, Clone, Copy)]
pub struct StepTable<T: Copy + 'static> {
    pub bands: &'static [Band<T>],
    /// 모든 상한을 넘었을 때의 값
    pub otherwise: T,
}

impl<T: Copy + 'static> StepTable<T> {
    /// 값이 속하는 첫 구간을 찾는다.
    pub fn lookup(&self, x: f64) -> T {
        self.bands
            .iter()
            .find(|band| band.contains(x))
            .map(|band| band.value)
            .unwrap_or(self.otherwise)
    }
}

/// 저선량 크기에 따른 출선 비트경 권고 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BitBand {
    Low,
    Medium,
    High,
}

impl BitBand {
    /// 권고 비트경(mm)
    pub fn diameter_mm(self) -> f64 {
        match self {
            BitBand::Low => 43.0,
            BitBand::Medium => 45.0,
            BitBand::High => 48.0,
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            BitBand::Low => "저선량이 적습니다. 43mm 비트로 줄여 출선 시간을 확보하십시오.",
            BitBand::Medium => "저선량이 보통입니다. 45mm 비트를 유지하십시오.",
            BitBand::High => "저선량이 많습니다. 48mm 비트로 키워 출선 속도를 높이십시오.",
        }
    }

    pub fn guidance_key(self) -> &'static str {
        match self {
            BitBand::Low => "guidance.bit_low",
            BitBand::Medium => "guidance.bit_medium",
            BitBand::High => "guidance.bit_high",
        }
    }
}

/// 조업지수 점수 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingPosture {
    LowScore,
    MidScore,
    HighScore,
}

impl OperatingPosture {
    pub fn guidance(self) -> &'static str {
        match self {
            OperatingPosture::LowScore => {
                "조업지수가 낮습니다. 비트경을 줄이고 출선구 전환 간격을 늘리십시오."
            }
            OperatingPosture::MidScore => "현재 조업 조건을 유지하십시오.",
            OperatingPosture::HighScore => {
                "고온 조업 상태입니다. 출선 간격을 줄이고 비트경 확대를 검토하십시오."
            }
        }
    }

    pub fn guidance_key(self) -> &'static str {
        match self {
            OperatingPosture::LowScore => "guidance.posture_low",
            OperatingPosture::MidScore => "guidance.posture_mid",
            OperatingPosture::HighScore => "guidance.posture_high",
        }
    }
}

/// 저선량(ton) → 비트경 구간. `> 8` HIGH, `> 5` MEDIUM, 나머지 LOW.
pub const BIT_DIAMETER_TABLE: StepTable<BitBand> = StepTable {
    bands: &[
        Band::at_most(5.0, BitBand::Low),
        Band::at_most(8.0, BitBand::Medium),
    ],
    otherwise: BitBand::High,
};

/// 조업지수 점수 → 조업 자세. `< 200` LOW, `> 500` HIGH, 나머지 유지.
pub const OPERATING_POSTURE_TABLE: StepTable<OperatingPosture> = StepTable {
    bands: &[
        Band::below(200.0, OperatingPosture::LowScore),
        Band::at_most(500.0, OperatingPosture::MidScore),
    ],
    otherwise: OperatingPosture::HighScore,
};

/// Ore/Coke 비 → 회수율. 하한 포함, 상한 미포함.
pub const RECOVERY_RATE_TABLE: StepTable<f64> = StepTable {
    bands: &[
        Band::below(4.0, 0.93),
        Band::below(5.0, 0.90),
        Band::below(6.0, 0.87),
    ],
    otherwise: 0.83,
};
