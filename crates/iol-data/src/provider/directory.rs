//! 시세 목록 페이지 → 심볼 디렉토리.
//!
//! 목록 페이지의 `<tbody>` 안 `<a data-symbol=... href=...>` 앵커를 수집합니다.

use iol_core::{DirectoryQuery, SymbolDirectory};
use scraper::{Html, Selector};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::client::IolClient;
use crate::error::Result;

/// 디렉토리 조회 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryOutcome {
    /// 모든 목록 페이지가 200으로 응답
    Listed(SymbolDirectory),
    /// 목록 페이지 중 하나가 200이 아닌 상태 코드를 반환
    Unavailable { status: u16, url: String },
    /// 지원하지 않는 (국가, 상품 유형) 조합
    Unsupported { country: String, instrument: String },
}

impl DirectoryOutcome {
    pub fn directory(&self) -> Option<&SymbolDirectory> {
        match self {
            Self::Listed(directory) => Some(directory),
            _ => None,
        }
    }

    pub fn into_directory(self) -> Option<SymbolDirectory> {
        match self {
            Self::Listed(directory) => Some(directory),
            _ => None,
        }
    }
}

impl IolClient {
    /// (국가, 상품 유형) 조합의 심볼 디렉토리를 조회합니다.
    pub async fn fetch_symbol_directory(
        &self,
        country: &str,
        instrument: &str,
    ) -> Result<DirectoryOutcome> {
        let query = DirectoryQuery::classify(country, instrument);
        self.fetch_directory(&query)
            .instrument(info_span!("symbol_directory", country = %country, instrument = %instrument))
            .await
    }

    /// 분류된 조회 조건으로 디렉토리를 조회합니다.
    ///
    /// 목록 페이지를 순서대로 요청하며, 하나라도 200이 아니면 나머지는
    /// 요청하지 않고 `Unavailable`을 반환합니다.
    pub async fn fetch_directory(&self, query: &DirectoryQuery) -> Result<DirectoryOutcome> {
        if let DirectoryQuery::Unsupported {
            country,
            instrument,
        } = query
        {
            info!(country = %country, instrument = %instrument, "지원하지 않는 목록 조합");
            return Ok(DirectoryOutcome::Unsupported {
                country: country.clone(),
                instrument: instrument.clone(),
            });
        }

        let mut directory = SymbolDirectory::new();
        for path in query.page_paths() {
            let page = self.get(&path, &[]).await?;
            if !page.is_ok() {
                warn!(url = %page.url, status = page.status.as_u16(), "목록 페이지 응답 실패");
                return Ok(DirectoryOutcome::Unavailable {
                    status: page.status.as_u16(),
                    url: page.url,
                });
            }
            directory = directory.merge(scrape_listing(&page.body));
        }

        info!(count = directory.len(), "심볼 디렉토리 수집 완료");
        Ok(DirectoryOutcome::Listed(directory))
    }
}

/// 목록 페이지 HTML에서 심볼 → URL 매핑을 추출합니다.
///
/// 첫 번째 `<tbody>`만 사용합니다. `data-symbol`이나 `href`가 없거나 빈
/// 앵커는 건너뜁니다. 중복 심볼은 처음 나온 항목이 남습니다.
pub fn scrape_listing(html: &str) -> SymbolDirectory {
    let document = Html::parse_document(html);

    let (Ok(tbody_selector), Ok(anchor_selector)) =
        (Selector::parse("tbody"), Selector::parse("a"))
    else {
        return SymbolDirectory::new();
    };

    let Some(tbody) = document.select(&tbody_selector).next() else {
        debug!("목록 페이지에 tbody 없음");
        return SymbolDirectory::new();
    };

    tbody
        .select(&anchor_selector)
        .filter_map(|anchor| {
            let symbol = anchor.value().attr("data-symbol")?.trim();
            let href = anchor.value().attr("href")?.trim();
            if symbol.is_empty() || href.is_empty() {
                return None;
            }
            Some((symbol.to_string(), href.to_string()))
        })
        .collect()
}
