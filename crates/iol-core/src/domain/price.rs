//! 일봉 데이터 타입.
//!
//! - `Bar` - 업스트림 JSON의 OHLCV 레코드 (원시)
//! - `PriceRow` / `PriceTable` - 날짜와 수익률이 붙은 정규화 결과

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 기본 심볼
pub const DEFAULT_SYMBOL: &str = "GGAL";

/// 기본 거래소
pub const DEFAULT_EXCHANGE: &str = "BCBA";

/// 업스트림 히스토리 엔드포인트의 OHLCV 레코드.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 시작 시각 (epoch 초)
    pub time: i64,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    #[serde(default)]
    pub volume: f64,
}

/// 정규화된 가격 표의 한 행.
///
/// 직렬화 시 업스트림 화면과 같은 스페인어 컬럼명을 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// 달력 날짜 (YYYY-MM-DD)
    pub fecha: String,
    /// 시가
    pub apertura: f64,
    /// 고가
    pub maximo: f64,
    /// 저가
    pub minimo: f64,
    /// 종가
    pub cierre: f64,
    /// 전일 종가 대비 수익률 (%)
    pub rendimiento: f64,
    /// 거래량
    pub volumen: f64,
}

/// 정규화된 가격 표.
///
/// 행 순서는 입력 순서를 그대로 따릅니다 (시간순 정렬 여부는 검증하지 않음).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// 컬럼 스키마. 빈 표에도 동일하게 적용됩니다.
    pub const COLUMNS: [&'static str; 7] = [
        "fecha",
        "apertura",
        "maximo",
        "minimo",
        "cierre",
        "rendimiento",
        "volumen",
    ];

    /// 행 목록으로 표를 생성합니다.
    pub fn new(rows: Vec<PriceRow>) -> Self {
        Self { rows }
    }

    /// 컬럼명 목록을 반환합니다.
    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRow> {
        self.rows.iter()
    }

    /// 수익률 컬럼을 반환합니다.
    pub fn returns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.rendimiento).collect()
    }
}

impl<'a> IntoIterator for &'a PriceTable {
    type Item = &'a PriceRow;
    type IntoIter = std::slice::Iter<'a, PriceRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// 가격 이력 조회 조건.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// 심볼 (예: GGAL)
    pub symbol: String,
    /// 시작일 (포함)
    pub from: NaiveDate,
    /// 종료일 (포함)
    pub to: NaiveDate,
    /// 거래소 (예: BCBA, NASDAQ)
    pub exchange: String,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            to: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            exchange: DEFAULT_EXCHANGE.to_string(),
        }
    }
}

impl HistoryQuery {
    /// 기본 거래소(BCBA)로 조회 조건을 생성합니다.
    pub fn new(symbol: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            from,
            to,
            exchange: DEFAULT_EXCHANGE.to_string(),
        }
    }

    /// "YYYY-MM-DD" 문자열로 조회 조건을 생성합니다.
    pub fn parse(symbol: impl Into<String>, from: &str, to: &str) -> CoreResult<Self> {
        Ok(Self::new(symbol, parse_date(from)?, parse_date(to)?))
    }

    /// 거래소를 설정합니다.
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    /// 기간이 비어 있는지 (시작일이 종료일 이후인지) 확인합니다.
    pub fn is_empty_range(&self) -> bool {
        self.from > self.to
    }
}

/// 날짜 문자열 파싱 (YYYY-MM-DD)
pub fn parse_date(s: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
        CoreError::InvalidInput(format!("Invalid date {}: {}. Expected YYYY-MM-DD", s, e))
    })
}
