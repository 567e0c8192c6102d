//! InvertirOnline 데이터 제공자.
//!
//! 각 모듈은 `IolClient`에 조회 메서드를 추가하고, 네트워크와 무관한
//! 파싱 함수는 별도로 공개합니다.

pub mod directory;
pub mod history;
pub mod intraday;
pub mod options;
pub mod resolver;

pub use directory::{scrape_listing, DirectoryOutcome};
pub use intraday::IntradayMarket;
pub use options::{
    parse_ar_decimal, parse_option_page, parse_option_tokens, table_token_rows, OPTION_FIELDS,
    OPTION_ROW_INDEX, OPTION_STRIDE,
};
pub use resolver::internal_id_for;
