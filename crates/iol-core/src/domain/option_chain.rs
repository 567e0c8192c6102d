//! 옵션 체인 타입.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 옵션 방향 (콜/풋).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    /// 콜 옵션 (페이지의 첫 번째 표)
    #[default]
    Calls,
    /// 풋 옵션 (페이지의 두 번째 표)
    Puts,
}

impl OptionSide {
    /// 옵션 페이지에서 이 방향이 차지하는 `<table>` 인덱스
    pub fn table_index(&self) -> usize {
        match self {
            Self::Calls => 0,
            Self::Puts => 1,
        }
    }
}

impl FromStr for OptionSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calls" | "call" => Ok(Self::Calls),
            "puts" | "put" => Ok(Self::Puts),
            _ => Err(format!("Unknown option side: {}. Use: calls, puts", s)),
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calls => write!(f, "calls"),
            Self::Puts => write!(f, "puts"),
        }
    }
}

/// 옵션 표의 한 행.
///
/// 페이지의 "Último" 컬럼이 두 번 나오므로 두 값을 `last`와 `last_close`로
/// 나누어 보관합니다. 숫자로 읽을 수 없는 셀은 `None`입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRow {
    /// 옵션 심볼 (행 키)
    #[serde(rename = "Símbolo")]
    pub label: String,
    /// 최근 체결가
    #[serde(rename = "Último")]
    pub last: Option<Decimal>,
    /// 변동률 (%)
    #[serde(rename = "Variación")]
    pub variation: Option<Decimal>,
    /// 시가
    #[serde(rename = "Apertura")]
    pub open: Option<Decimal>,
    /// 고가
    #[serde(rename = "Máximo")]
    pub high: Option<Decimal>,
    /// 저가
    #[serde(rename = "Mínimo")]
    pub low: Option<Decimal>,
    /// 두 번째 "Último" 컬럼
    #[serde(rename = "Último Cierre")]
    pub last_close: Option<Decimal>,
    /// 종가
    #[serde(rename = "Cierre")]
    pub close: Option<Decimal>,
    /// 거래량
    #[serde(rename = "Volumen")]
    pub volume: Option<Decimal>,
    /// 일자 (페이지 표기 그대로)
    #[serde(rename = "Fecha")]
    pub date: String,
}

impl OptionRow {
    /// 표 출력용 컬럼명
    pub const COLUMNS: [&'static str; 10] = [
        "Símbolo",
        "Último",
        "Variación",
        "Apertura",
        "Máximo",
        "Mínimo",
        "Último Cierre",
        "Cierre",
        "Volumen",
        "Fecha",
    ];
}

/// 한 방향의 옵션 체인.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// 기초자산 심볼
    pub symbol: String,
    /// 방향
    pub side: OptionSide,
    /// 행 목록 (페이지 순서)
    pub rows: Vec<OptionRow>,
}

impl OptionChain {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 라벨로 행을 찾습니다.
    pub fn get(&self, label: &str) -> Option<&OptionRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parse_and_index() {
        assert_eq!("calls".parse::<OptionSide>().unwrap(), OptionSide::Calls);
        assert_eq!("PUT".parse::<OptionSide>().unwrap(), OptionSide::Puts);
        assert!("straddle".parse::<OptionSide>().is_err());
        assert_eq!(OptionSide::Calls.table_index(), 0);
        assert_eq!(OptionSide::Puts.table_index(), 1);
        assert_eq!(OptionSide::Puts.to_string(), "puts");
    }
}
