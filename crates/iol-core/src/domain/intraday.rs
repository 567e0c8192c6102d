//! 장중 체결 데이터 타입.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 업스트림 장중 엔드포인트의 체결 레코드.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tick {
    /// 체결 시각
    #[serde(rename = "FechaHora")]
    pub timestamp: TickTimestamp,
    /// 체결 수량 (액면)
    #[serde(rename = "CantidadNominal", default)]
    pub quantity: f64,
    /// 체결가
    #[serde(rename = "Ultima")]
    pub price: f64,
}

/// 체결 시각.
///
/// 업스트림은 epoch 숫자, `/Date(ms)/` 리터럴, ISO-8601 문자열을 섞어서
/// 내려줄 수 있어 세 형식을 모두 받습니다. 오프셋 없는 ISO 문자열은
/// 시장 현지 시각(벽시계)으로 취급합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTimestamp")]
pub enum TickTimestamp {
    /// epoch 초
    Epoch(i64),
    /// 오프셋 없는 현지 시각
    Wall(NaiveDateTime),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Int(i64),
    Float(f64),
    Text(String),
}

/// 이 값보다 큰 epoch 숫자는 밀리초로 간주
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

const WALL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn epoch_seconds(value: i64) -> i64 {
    if value.abs() > EPOCH_MILLIS_THRESHOLD {
        value / 1000
    } else {
        value
    }
}

impl TryFrom<RawTimestamp> for TickTimestamp {
    type Error = String;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        match raw {
            RawTimestamp::Int(v) => Ok(Self::Epoch(epoch_seconds(v))),
            RawTimestamp::Float(v) => Ok(Self::Epoch(epoch_seconds(v as i64))),
            RawTimestamp::Text(s) => s.parse(),
        }
    }
}

impl std::str::FromStr for TickTimestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // .NET JSON 날짜: /Date(1697551205000)/ 또는 /Date(1697551205000-0300)/
        if let Some(inner) = s.strip_prefix("/Date(").and_then(|r| r.strip_suffix(")/")) {
            let digits: String = inner
                .chars()
                .enumerate()
                .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
                .map(|(_, c)| c)
                .collect();
            let millis: i64 = digits
                .parse()
                .map_err(|_| format!("invalid /Date()/ literal: {}", s))?;
            return Ok(Self::Epoch(millis / 1000));
        }

        if let Ok(v) = s.parse::<i64>() {
            return Ok(Self::Epoch(epoch_seconds(v)));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Epoch(dt.timestamp()));
        }

        WALL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Self::Wall)
            .ok_or_else(|| format!("unrecognized timestamp: {}", s))
    }
}

/// 정규화된 장중 표의 한 행.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayRow {
    /// 체결 시각 (HH:MM:SS)
    #[serde(rename = "Hora")]
    pub hora: String,
    /// 체결 수량
    #[serde(rename = "Nominales")]
    pub nominales: f64,
    /// 체결가
    #[serde(rename = "Precio")]
    pub precio: f64,
}

/// 정규화된 장중 표.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntradayTable {
    rows: Vec<IntradayRow>,
}

impl IntradayTable {
    /// 컬럼 스키마. 빈 표에도 동일하게 적용됩니다.
    pub const COLUMNS: [&'static str; 3] = ["Hora", "Nominales", "Precio"];

    pub fn new(rows: Vec<IntradayRow>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    pub fn rows(&self) -> &[IntradayRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IntradayRow> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_tick(json: &str) -> Tick {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_tick_epoch_seconds_and_millis() {
        let tick = parse_tick(r#"{"FechaHora":1697551205,"CantidadNominal":100,"Ultima":1234.5}"#);
        assert_eq!(tick.timestamp, TickTimestamp::Epoch(1_697_551_205));
        assert_eq!(tick.quantity, 100.0);
        assert_eq!(tick.price, 1234.5);

        let tick = parse_tick(r#"{"FechaHora":1697551205000,"CantidadNominal":1,"Ultima":1}"#);
        assert_eq!(tick.timestamp, TickTimestamp::Epoch(1_697_551_205));
    }

    #[test]
    fn test_tick_dotnet_date() {
        let tick = parse_tick(r#"{"FechaHora":"/Date(1697551205000)/","CantidadNominal":5,"Ultima":2}"#);
        assert_eq!(tick.timestamp, TickTimestamp::Epoch(1_697_551_205));

        let with_offset: TickTimestamp = "/Date(1697551205000-0300)/".parse().unwrap();
        assert_eq!(with_offset, TickTimestamp::Epoch(1_697_551_205));
    }

    #[test]
    fn test_tick_iso_wall_clock() {
        let tick = parse_tick(
            r#"{"FechaHora":"2023-10-17T11:00:05.297","CantidadNominal":5,"Ultima":2}"#,
        );
        match tick.timestamp {
            TickTimestamp::Wall(dt) => assert_eq!(dt.format("%H:%M:%S").to_string(), "11:00:05"),
            other => panic!("expected wall clock, got {:?}", other),
        }
    }

    #[test]
    fn test_tick_rfc3339_is_epoch() {
        let ts: TickTimestamp = "2020-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(ts, TickTimestamp::Epoch(1_577_836_800));
    }

    #[test]
    fn test_tick_rejects_garbage() {
        let result: Result<Tick, _> =
            serde_json::from_str(r#"{"FechaHora":"ayer","CantidadNominal":5,"Ultima":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_intraday_schema() {
        let table = IntradayTable::default();
        assert!(table.is_empty());
        assert_eq!(table.columns(), ["Hora", "Nominales", "Precio"]);
    }
}
