//! InvertirOnline 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - HTTP 클라이언트 (`IolClient`)
//! - 시세 목록 페이지 스크래핑 → 심볼 디렉토리
//! - 심볼 → 내부 ID 변환
//! - 일봉 이력, 장중 체결, 옵션 체인 조회
//!
//! 모든 조회는 요청 단위로 수행되며 결과를 캐시하지 않습니다.

pub mod client;
pub mod error;
pub mod provider;

pub use client::IolClient;
pub use error::{DataError, Result};

pub use provider::{
    internal_id_for, parse_ar_decimal, parse_option_page, parse_option_tokens, scrape_listing,
    table_token_rows, DirectoryOutcome, IntradayMarket, OPTION_FIELDS, OPTION_ROW_INDEX,
    OPTION_STRIDE,
};
