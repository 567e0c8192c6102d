//! 시장 시계.
//!
//! 업스트림은 epoch 초 단위 타임스탬프를 사용하고, 표에는 달력 날짜와
//! 시각 문자열이 들어갑니다. 두 표현 사이의 변환은 항상 이 시계를 거칩니다.
//! 기본값은 프로세스의 로컬 타임존이며 IANA 타임존을 지정할 수도 있습니다.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// 날짜 형식 (YYYY-MM-DD)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 시각 형식 (HH:MM:SS)
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// 타임스탬프 ↔ 날짜/시각 변환에 사용하는 타임존.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketClock {
    /// 프로세스 로컬 타임존
    #[default]
    Local,
    /// 지정된 IANA 타임존
    Zone(Tz),
}

impl MarketClock {
    /// UTC 시계 (테스트 및 결정적 출력용)
    pub fn utc() -> Self {
        Self::Zone(chrono_tz::UTC)
    }

    /// 타임스탬프의 달력 날짜를 반환합니다 (YYYY-MM-DD).
    pub fn date_of(&self, timestamp: i64) -> CoreResult<String> {
        self.format(timestamp, DATE_FORMAT)
    }

    /// 타임스탬프의 시각을 반환합니다 (HH:MM:SS).
    pub fn time_of(&self, timestamp: i64) -> CoreResult<String> {
        self.format(timestamp, TIME_FORMAT)
    }

    /// 날짜의 자정 타임스탬프(epoch 초)를 반환합니다.
    pub fn midnight(&self, date: NaiveDate) -> CoreResult<i64> {
        match self {
            Self::Local => midnight_in(&Local, date),
            Self::Zone(tz) => midnight_in(tz, date),
        }
    }

    fn format(&self, timestamp: i64, fmt: &str) -> CoreResult<String> {
        match self {
            Self::Local => format_in(&Local, timestamp, fmt),
            Self::Zone(tz) => format_in(tz, timestamp, fmt),
        }
    }
}

fn format_in<Z: TimeZone>(zone: &Z, timestamp: i64, fmt: &str) -> CoreResult<String>
where
    Z::Offset: fmt::Display,
{
    let utc = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        CoreError::InvalidInput(format!("timestamp out of range: {}", timestamp))
    })?;
    Ok(utc.with_timezone(zone).format(fmt).to_string())
}

fn midnight_in<Z: TimeZone>(zone: &Z, date: NaiveDate) -> CoreResult<i64> {
    let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        CoreError::InvalidInput(format!("invalid date: {}", date))
    })?;

    // 자정이 DST 전환으로 존재하지 않는 타임존은 한 시간 뒤로 보정
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| zone.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.timestamp())
        .ok_or_else(|| CoreError::InvalidInput(format!("no local midnight for {}", date)))
}

impl FromStr for MarketClock {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        s.parse::<Tz>()
            .map(Self::Zone)
            .map_err(|e| CoreError::Config(format!("unknown timezone {}: {}", s, e)))
    }
}

impl fmt::Display for MarketClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Zone(tz) => write!(f, "{}", tz.name()),
        }
    }
}
