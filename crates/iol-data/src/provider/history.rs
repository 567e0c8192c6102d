//! 일봉 가격 이력.
//!
//! `GET /api/cotizaciones/history?symbolName=&exchange=&from=&to=&resolution=D`
//! 응답의 `bars` 배열을 가격 표로 정규화합니다.

use async_trait::async_trait;
use iol_core::{market_span, normalize_bars, Bar, HistoryQuery, PriceHistorySource, PriceTable};
use serde::Deserialize;
use tracing::{debug, Instrument};

use crate::client::IolClient;
use crate::error::{DataError, Result};

/// 이력 API 경로
pub const HISTORY_PATH: &str = "/api/cotizaciones/history";

/// 일봉 해상도
pub const DAILY_RESOLUTION: &str = "D";

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    /// 데이터가 없으면 필드가 빠지거나 null일 수 있음
    #[serde(default)]
    bars: Option<Vec<Bar>>,
}

impl IolClient {
    /// 원시 일봉 목록을 조회합니다.
    ///
    /// 시작일이 종료일 이후이면 요청 없이 빈 목록을 반환합니다.
    pub async fn fetch_bars(&self, query: &HistoryQuery) -> Result<Vec<Bar>> {
        if query.is_empty_range() {
            debug!(from = %query.from, to = %query.to, "빈 기간, 요청 생략");
            return Ok(Vec::new());
        }

        let from = self.clock().midnight(query.from)?;
        let to = self.clock().midnight(query.to)?;

        let params = [
            ("symbolName", query.symbol.clone()),
            ("exchange", query.exchange.clone()),
            ("from", from.to_string()),
            ("to", to.to_string()),
            ("resolution", DAILY_RESOLUTION.to_string()),
        ];

        let page = self.get(HISTORY_PATH, &params).await?.ensure_ok()?;
        let response: HistoryResponse = serde_json::from_str(&page.body)?;
        let bars = response.bars.unwrap_or_default();

        debug!(count = bars.len(), "일봉 수신");
        Ok(bars)
    }

    /// 가격 이력을 조회하여 정규화된 표로 반환합니다.
    ///
    /// # Errors
    ///
    /// - `DataError::Upstream`: 200이 아닌 응답
    /// - `DataError::MalformedResponse`: JSON이 아니거나 `bars` 형식이 다른 경우
    /// - `DataError::Core`: 직전 종가가 0인 경우
    pub async fn fetch_price_history(&self, query: &HistoryQuery) -> Result<PriceTable> {
        let span = market_span!("price_history", query.symbol, query.exchange);
        async {
            let bars = self.fetch_bars(query).await?;
            let table = normalize_bars(&bars, self.clock())?;
            Ok::<_, DataError>(table)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl PriceHistorySource for IolClient {
    fn name(&self) -> &str {
        "invertironline"
    }

    async fn price_history(
        &self,
        query: &HistoryQuery,
    ) -> std::result::Result<PriceTable, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.fetch_price_history(query).await?)
    }
}
