//! 심볼 → 내부 ID 변환.
//!
//! 장중/옵션 엔드포인트는 티커 대신 상세 페이지 URL의 마지막 조각을 ID로 받습니다.

use iol_core::{InternalId, SymbolDirectory};
use tracing::debug;

use crate::client::IolClient;
use crate::error::{DataError, Result};

impl IolClient {
    /// 목록 페이지를 조회하여 심볼의 내부 ID를 찾습니다.
    ///
    /// # Errors
    ///
    /// - `DataError::NotFound`: 디렉토리가 비었거나 조회할 수 없는 경우, 또는 심볼이 없는 경우
    /// - `DataError::MalformedResponse`: 상세 URL에서 ID를 추출할 수 없는 경우
    /// - 목록 페이지 요청 자체의 전송 오류
    pub async fn resolve_internal_id(
        &self,
        symbol: &str,
        country: &str,
        instrument: &str,
    ) -> Result<InternalId> {
        let outcome = self.fetch_symbol_directory(country, instrument).await?;
        let directory = outcome.into_directory().unwrap_or_default();

        let id = internal_id_for(&directory, symbol, country, instrument)?;
        debug!(symbol, id = %id, "내부 ID 변환");
        Ok(id)
    }
}

/// 이미 수집된 디렉토리에서 심볼의 내부 ID를 찾습니다.
pub fn internal_id_for(
    directory: &SymbolDirectory,
    symbol: &str,
    country: &str,
    instrument: &str,
) -> Result<InternalId> {
    if directory.is_empty() {
        return Err(DataError::NotFound(format!(
            "no symbols found for country={} type={}",
            country, instrument
        )));
    }

    let url = directory.get(symbol.trim()).ok_or_else(|| {
        DataError::NotFound(format!(
            "symbol {} not listed for country={} type={}",
            symbol, country, instrument
        ))
    })?;

    InternalId::from_url(url).ok_or_else(|| {
        DataError::MalformedResponse(format!("no id segment in detail url '{}'", url))
    })
}
