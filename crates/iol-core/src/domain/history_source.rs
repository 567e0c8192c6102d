//! 가격 이력 제공자 추상화.
//!
//! 통계 계산 쪽이 HTTP 클라이언트에 직접 의존하지 않도록
//! 가격 이력 조회를 trait 뒤로 숨깁니다.

use async_trait::async_trait;

use super::price::{HistoryQuery, PriceTable};

/// 가격 이력 제공자 trait.
///
/// # 구현 예시
///
/// ```ignore
/// #[async_trait]
/// impl PriceHistorySource for IolClient {
///     async fn price_history(&self, query: &HistoryQuery) -> Result<PriceTable, ...> {
///         // 히스토리 엔드포인트 호출 후 정규화
///     }
/// }
/// ```
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// 제공자 이름.
    fn name(&self) -> &str;

    /// 조회 조건에 해당하는 가격 표를 반환합니다.
    ///
    /// 데이터가 없는 경우(잘못된 심볼, 빈 기간)는 에러가 아니라 빈 표입니다.
    async fn price_history(
        &self,
        query: &HistoryQuery,
    ) -> Result<PriceTable, Box<dyn std::error::Error + Send + Sync>>;
}
