//! tracing 기반 로깅.
//!
//! 로그는 항상 stderr로 나가므로 stdout의 표/CSV/JSON 출력과 섞이지 않습니다.
//! 형식은 pretty(기본), json, compact 중 하나입니다.

use std::fmt as stdfmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// HTTP/HTML 파서 계열 crate의 잡음을 줄이는 기본 필터 지시어
pub const QUIET_DEPENDENCIES: &str =
    "hyper=warn,hyper_util=warn,reqwest=warn,html5ever=warn,selectors=warn";

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄, 색상 포함
    #[default]
    Pretty,
    /// 한 줄 JSON
    Json,
    /// 한 줄 텍스트
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}. Use: pretty, json, compact", s)),
        }
    }
}

impl stdfmt::Display for LogFormat {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

/// 로깅 초기화 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// 필터 지시어 (예: "info", "iol_data=debug")
    pub level: String,
    pub format: LogFormat,
    /// 요청 span의 시작/종료도 기록
    pub with_span_events: bool,
    /// 소스 파일/줄 번호 표시
    pub with_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::Pretty,
            with_span_events: false,
            with_file: false,
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    /// 설정 레벨에 의존성 잡음 억제 지시어를 덧붙인 필터 문자열.
    pub fn directives(&self) -> String {
        format!("{},{}", self.level, QUIET_DEPENDENCIES)
    }
}

/// 전역 subscriber를 설치합니다.
///
/// `RUST_LOG`가 설정되어 있으면 설정 파일의 레벨보다 우선합니다.
/// 이미 설치된 경우 에러를 반환합니다.
///
/// ```no_run
/// use iol_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("iol_data=debug").with_format(LogFormat::Compact)).ok();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.directives()))?;

    let span_events = if config.with_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    macro_rules! to_stderr {
        ($layer:expr) => {
            $layer
                .with_writer(std::io::stderr)
                .with_file(config.with_file)
                .with_line_number(config.with_file)
                .with_span_events(span_events.clone())
                .boxed()
        };
    }

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => to_stderr!(fmt::layer().pretty()),
        LogFormat::Json => to_stderr!(fmt::layer().json()),
        LogFormat::Compact => to_stderr!(fmt::layer().compact()),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    tracing::debug!(format = %config.format, level = %config.level, "로깅 초기화");
    Ok(())
}

/// 심볼(및 거래소) 필드가 붙은 요청 span.
///
/// 이름은 문자열 리터럴이어야 합니다.
#[macro_export]
macro_rules! market_span {
    ($name:expr, $symbol:expr) => {
        tracing::info_span!($name, symbol = %$symbol)
    };
    ($name:expr, $symbol:expr, $exchange:expr) => {
        tracing::info_span!($name, symbol = %$symbol, exchange = %$exchange)
    };
}
