//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 우선순위: 기본값 → TOML 파일 → `IOL__` 접두사 환경 변수.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::clock::MarketClock;
use crate::error::CoreResult;
use crate::logging::{LogConfig, LogFormat};

/// InvertirOnline 기본 URL
pub const DEFAULT_BASE_URL: &str = "https://iol.invertironline.com";

/// 기본 요청 타임아웃 (초)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 기본 User-Agent (브라우저로 위장하지 않으면 일부 페이지가 빈 표를 반환)
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP 클라이언트 설정
    #[serde(default)]
    pub http: HttpConfig,
    /// 시장 설정
    #[serde(default)]
    pub market: MarketConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP 클라이언트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// 요청 기본 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent 헤더
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// 지정한 기본 URL로 설정을 생성합니다 (테스트 서버 연결용).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// 요청 타임아웃을 반환합니다.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 시장 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    /// 날짜/시각 변환에 사용할 타임존 ("local" 또는 IANA 이름)
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// 기본 거래소
    #[serde(default = "default_exchange")]
    pub default_exchange: String,
}

fn default_timezone() -> String {
    "local".to_string()
}
fn default_exchange() -> String {
    "BCBA".to_string()
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            default_exchange: default_exchange(),
        }
    }
}

impl MarketConfig {
    /// 설정된 타임존으로 시장 시계를 생성합니다.
    pub fn clock(&self) -> CoreResult<MarketClock> {
        self.timezone.parse()
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// 로깅 초기화용 설정으로 변환합니다. 알 수 없는 형식은 pretty로 처리합니다.
    pub fn to_log_config(&self) -> LogConfig {
        let format = self.format.parse().unwrap_or(LogFormat::Pretty);
        LogConfig::new(self.level.clone()).with_format(format)
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()))
    }

    /// 기본 경로에서 설정을 로드합니다. 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config/default").required(false))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("http.base_url", DEFAULT_BASE_URL)?
            .set_default("http.timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("http.user_agent", DEFAULT_USER_AGENT)?
            .set_default("market.timezone", "local")?
            .set_default("market.default_exchange", "BCBA")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(file)
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("IOL")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
