//! 출선 작업 계산 모듈 모음.
//! 출선 속도 모델, 노내 저선량 추정, A/B 출선 일정, 권고 테이블, 합성 리포트로 구성한다.

pub mod recommendation;
pub mod report;
pub mod residual_melt;
pub mod scheduler;
pub mod speed_model;

pub use report::{evaluate, CastingInput, CastingReport};
pub use residual_melt::*;
pub use scheduler::*;
pub use speed_model::*;
