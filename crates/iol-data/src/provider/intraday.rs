//! 장중 체결 데이터.
//!
//! `GET /Titulo/GraficoIntradiario?idTitulo={id}&idTipo=4&idMercado={n}`

use iol_core::{market_span, normalize_ticks, IntradayTable, InternalId, Tick};
use std::fmt;
use tracing::{debug, info, warn, Instrument};

use crate::client::IolClient;
use crate::error::{DataError, Result};

/// 장중 API 경로
pub const INTRADAY_PATH: &str = "/Titulo/GraficoIntradiario";

/// 장중 API의 고정 유형 파라미터
const INTRADAY_TYPE_ID: &str = "4";

/// 장중 데이터를 제공하는 시장.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntradayMarket {
    /// 부에노스아이레스 거래소
    Bcba,
    /// 나스닥
    Nasdaq,
}

impl IntradayMarket {
    /// 거래소 코드로 시장을 찾습니다. 대소문자는 무시합니다.
    pub fn from_exchange(exchange: &str) -> Option<Self> {
        match exchange.trim().to_uppercase().as_str() {
            "BCBA" => Some(Self::Bcba),
            "NASDAQ" => Some(Self::Nasdaq),
            _ => None,
        }
    }

    /// 업스트림 시장 ID
    pub fn market_id(&self) -> u8 {
        match self {
            Self::Bcba => 1,
            Self::Nasdaq => 3,
        }
    }
}

impl fmt::Display for IntradayMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bcba => write!(f, "BCBA"),
            Self::Nasdaq => write!(f, "NASDAQ"),
        }
    }
}

impl IolClient {
    /// 내부 ID로 원시 체결 목록을 조회합니다.
    pub async fn fetch_ticks(&self, id: &InternalId, market: IntradayMarket) -> Result<Vec<Tick>> {
        let params = [
            ("idTitulo", id.to_string()),
            ("idTipo", INTRADAY_TYPE_ID.to_string()),
            ("idMercado", market.market_id().to_string()),
        ];

        let page = self.get(INTRADAY_PATH, &params).await?.ensure_ok()?;
        let ticks: Option<Vec<Tick>> = serde_json::from_str(&page.body)?;
        let ticks = ticks.unwrap_or_default();

        debug!(count = ticks.len(), market = %market, "체결 수신");
        Ok(ticks)
    }

    /// 심볼의 당일 장중 체결 표를 조회합니다.
    ///
    /// 심볼을 내부 ID로 변환하지 못하거나 지원하지 않는 거래소이면 빈 표를 반환합니다.
    ///
    /// # Errors
    ///
    /// - `DataError::Upstream`: 장중 API가 200이 아닌 응답을 반환
    /// - `DataError::MalformedResponse`: 체결 배열이 아닌 응답
    pub async fn fetch_intraday(
        &self,
        symbol: &str,
        country: &str,
        instrument: &str,
        exchange: &str,
    ) -> Result<IntradayTable> {
        async {
            let id = match self.resolve_internal_id(symbol, country, instrument).await {
                Ok(id) => id,
                Err(e) => {
                    warn!(error = %e, "내부 ID 변환 실패, 빈 표 반환");
                    return Ok(IntradayTable::default());
                }
            };

            let Some(market) = IntradayMarket::from_exchange(exchange) else {
                warn!("장중 데이터를 지원하지 않는 거래소, 빈 표 반환");
                return Ok(IntradayTable::default());
            };

            let ticks = self.fetch_ticks(&id, market).await?;
            let table = normalize_ticks(&ticks, self.clock())?;
            info!(rows = table.len(), "장중 표 생성");
            Ok::<_, DataError>(table)
        }
        .instrument(market_span!("intraday", symbol, exchange))
        .await
    }
}
