//! 옵션 체인.
//!
//! `POST /Titulo/Opciones` (폼 필드 `idTitulo`)가 반환하는 HTML에는 콜/풋
//! 두 개의 표가 있습니다. 표의 평탄화된 텍스트를 줄 단위로 나누고 공백으로
//! 토큰화한 뒤, 데이터 줄의 토큰을 10개씩 묶어 행으로 만듭니다.

use iol_core::{OptionChain, OptionRow, OptionSide, DEFAULT_COUNTRY, DEFAULT_INSTRUMENT};
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use tracing::{debug, info, info_span, Instrument};

use crate::client::IolClient;
use crate::error::{DataError, Result};

/// 옵션 API 경로
pub const OPTIONS_PATH: &str = "/Titulo/Opciones";

/// 모든 레코드가 들어 있는 텍스트 줄의 인덱스
pub const OPTION_ROW_INDEX: usize = 3;

/// 레코드 하나의 토큰 수
pub const OPTION_STRIDE: usize = 10;

/// 레코드 내 토큰 순서
pub const OPTION_FIELDS: [&str; OPTION_STRIDE] = [
    "label",
    "last",
    "variation",
    "open",
    "high",
    "low",
    "last_close",
    "close",
    "volume",
    "date",
];

impl IolClient {
    /// 심볼의 옵션 체인을 조회합니다.
    ///
    /// 내부 ID는 기본 국가/상품 유형(argentina/acciones) 목록에서 찾습니다.
    pub async fn fetch_option_chain(&self, symbol: &str, side: OptionSide) -> Result<OptionChain> {
        async {
            let id = self
                .resolve_internal_id(symbol, DEFAULT_COUNTRY, DEFAULT_INSTRUMENT)
                .await?;

            let page = self
                .post_form(OPTIONS_PATH, &[("idTitulo", id.as_str())])
                .await?
                .ensure_ok()?;

            let rows = parse_option_page(&page.body, side)?;
            info!(rows = rows.len(), "옵션 체인 파싱 완료");

            Ok::<_, DataError>(OptionChain {
                symbol: symbol.to_string(),
                side,
                rows,
            })
        }
        .instrument(info_span!("option_chain", symbol = %symbol, side = %side))
        .await
    }
}

/// 문서의 모든 `<table>`을 줄별 토큰 목록으로 분해합니다.
///
/// 반환값은 `[표][줄][토큰]` 구조입니다. 빈 줄도 인덱스를 유지하기 위해 남깁니다.
pub fn table_token_rows(html: &str) -> Vec<Vec<Vec<String>>> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("table") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|table| {
            let text: String = table.text().collect();
            text.split('\n')
                .map(|line| line.split_whitespace().map(str::to_string).collect())
                .collect()
        })
        .collect()
}

/// 옵션 페이지 HTML에서 한 방향의 행을 추출합니다.
///
/// # Errors
///
/// - 표가 두 개 미만이거나 데이터 줄이 없으면 `DataError::MalformedResponse`
pub fn parse_option_page(html: &str, side: OptionSide) -> Result<Vec<OptionRow>> {
    let tables = table_token_rows(html);
    if tables.len() < 2 {
        return Err(DataError::MalformedResponse(format!(
            "expected calls and puts tables, found {}",
            tables.len()
        )));
    }

    let lines = &tables[side.table_index()];
    let tokens = lines.get(OPTION_ROW_INDEX).ok_or_else(|| {
        DataError::MalformedResponse(format!(
            "{} table has {} text lines, data line {} missing",
            side,
            lines.len(),
            OPTION_ROW_INDEX
        ))
    })?;

    Ok(parse_option_tokens(tokens))
}

/// 토큰을 `OPTION_STRIDE`개씩 묶어 행으로 변환합니다. 남는 토큰은 버립니다.
pub fn parse_option_tokens(tokens: &[String]) -> Vec<OptionRow> {
    let chunks = tokens.chunks_exact(OPTION_STRIDE);
    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        debug!(
            dropped = remainder.len(),
            first = %remainder[0],
            "불완전한 옵션 레코드 무시"
        );
    }

    chunks.map(option_row).collect()
}

fn option_row(fields: &[String]) -> OptionRow {
    OptionRow {
        label: fields[0].clone(),
        last: parse_ar_decimal(&fields[1]),
        variation: parse_ar_decimal(&fields[2]),
        open: parse_ar_decimal(&fields[3]),
        high: parse_ar_decimal(&fields[4]),
        low: parse_ar_decimal(&fields[5]),
        last_close: parse_ar_decimal(&fields[6]),
        close: parse_ar_decimal(&fields[7]),
        volume: parse_ar_decimal(&fields[8]),
        date: fields[9].clone(),
    }
}

/// 아르헨티나 표기 숫자를 파싱합니다.
///
/// 천 단위 구분자는 `.`, 소수점은 `,`입니다. 끝의 `%`는 제거합니다.
/// `-`만 있거나 숫자가 아니면 `None`.
pub fn parse_ar_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }

    let normalized = trimmed.replace('.', "").replace(',', ".");
    normalized.parse().ok()
}
