//! 데이터 모듈 오류 타입.

use iol_core::CoreError;
use thiserror::Error;

/// 데이터 수집 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 심볼/ID를 찾을 수 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 업스트림이 200이 아닌 상태 코드를 반환
    #[error("Upstream error: HTTP {status} from {url}")]
    Upstream { status: u16, url: String },

    /// 요청 타임아웃
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// 연결 실패 등 전송 계층 오류
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// 예상과 다른 JSON/HTML 구조
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 정규화 단계 오류 (0으로 나누기 등)
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl DataError {
    /// 업스트림(네트워크/상태 코드) 계열 오류인지 확인합니다.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            DataError::Upstream { .. } | DataError::Timeout(_) | DataError::Http(_)
        )
    }

    /// 업스트림 상태 코드 (있는 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            DataError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::MalformedResponse(err.to_string())
        } else {
            DataError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        let err = DataError::Upstream {
            status: 503,
            url: "https://iol.invertironline.com/api".to_string(),
        };
        assert!(err.is_upstream());
        assert_eq!(err.status(), Some(503));

        assert!(DataError::Timeout("30s".to_string()).is_upstream());
        assert!(!DataError::NotFound("GGAL".to_string()).is_upstream());
        assert!(!DataError::MalformedResponse("no table".to_string()).is_upstream());
    }

    #[test]
    fn test_from_json_error_is_malformed() {
        let err: DataError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, DataError::MalformedResponse(_)));
    }

    #[test]
    fn test_core_error_passthrough() {
        let err: DataError = CoreError::Division("close[0] is zero".to_string()).into();
        assert_eq!(err.to_string(), "0으로 나누기: close[0] is zero");
        assert!(!err.is_upstream());
    }
}
