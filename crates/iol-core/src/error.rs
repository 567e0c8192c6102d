//! 핵심 도메인 에러 타입.
//!
//! 정규화와 통계 계산처럼 네트워크와 무관한 단계에서 발생하는 에러를 정의합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// 0으로 나누기 (직전 종가 0, 통계 분모 0 등)
    #[error("0으로 나누기: {0}")]
    Division(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// 통계적으로 퇴화된 입력에서 발생한 에러인지 확인합니다.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, CoreError::Division(_))
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
