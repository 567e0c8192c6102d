//! CRO 통계.
//!
//! 일별 수익률을 양(> 0)과 비양(≤ 0) 두 집단으로 나누고, 각 집단의
//! 평균과 표본 표준편차로 상승 쪽 분포 폭을 하락 쪽과 비교합니다.
//!
//! ```text
//! r   = (1 + threshold)^(1/360) - 1
//! CRO = (n⁺ · (σ⁺ + μ⁺ - r)) / (n⁻ · |σ⁻ + μ⁻|)
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use iol_core::{market_span, CoreError, CoreResult, HistoryQuery, PriceHistorySource};
use serde::Serialize;
use tracing::{debug, info, warn, Instrument};

use crate::stats::PartitionStats;

/// 기본 연간 기준 수익률 (0.5 = 50%)
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// 기준 수익률을 일 단위로 환산할 때 쓰는 연간 일수
pub const RATE_DAYS: f64 = 360.0;

/// 연간 기준 수익률을 일 단위 복리 수익률로 환산합니다.
pub fn daily_threshold_rate(threshold: f64) -> f64 {
    (1.0 + threshold).powf(1.0 / RATE_DAYS) - 1.0
}

/// CRO 계산 중간값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CroBreakdown {
    /// 양의 수익률 집단
    pub positive: PartitionStats,
    /// 0 이하 수익률 집단
    pub non_positive: PartitionStats,
    /// 일 단위 기준 수익률
    pub daily_rate: f64,
    /// 최종 값
    pub value: f64,
}

/// 수익률 목록으로 CRO와 중간값을 계산합니다.
///
/// # Errors
///
/// - `CoreError::InvalidInput`: 두 집단 중 하나가 비어 있거나 결과가 유한하지 않은 경우
/// - `CoreError::Division`: 분모가 0인 경우
pub fn compute_cro_breakdown(returns: &[f64], threshold: f64) -> CoreResult<CroBreakdown> {
    let (positives, non_positives): (Vec<f64>, Vec<f64>) =
        returns.iter().copied().partition(|&r| r > 0.0);

    let positive = PartitionStats::from_values(&positives)
        .ok_or_else(|| CoreError::InvalidInput("no positive returns".to_string()))?;
    let non_positive = PartitionStats::from_values(&non_positives)
        .ok_or_else(|| CoreError::InvalidInput("no non-positive returns".to_string()))?;

    let daily_rate = daily_threshold_rate(threshold);
    let numerator = positive.count as f64 * (positive.std + positive.mean - daily_rate);
    let denominator = non_positive.count as f64 * (non_positive.std + non_positive.mean).abs();

    if denominator == 0.0 {
        return Err(CoreError::Division(format!(
            "non-positive spread is zero (n={}, mean={}, std={})",
            non_positive.count, non_positive.mean, non_positive.std
        )));
    }

    let value = numerator / denominator;
    if !value.is_finite() {
        return Err(CoreError::InvalidInput(format!("non-finite CRO: {}", value)));
    }

    Ok(CroBreakdown {
        positive,
        non_positive,
        daily_rate,
        value,
    })
}

/// 수익률 목록으로 CRO를 계산합니다.
pub fn compute_cro(returns: &[f64], threshold: f64) -> CoreResult<f64> {
    compute_cro_breakdown(returns, threshold).map(|b| b.value)
}

/// 가격 이력을 조회하여 CRO를 계산하는 계산기.
///
/// 조회 실패, 빈 이력, 통계적 퇴화는 모두 0.0으로 보고하며 원인은 로그로 남깁니다.
#[derive(Clone)]
pub struct CroCalculator {
    source: Arc<dyn PriceHistorySource>,
    threshold: f64,
}

impl CroCalculator {
    pub fn new(source: Arc<dyn PriceHistorySource>) -> Self {
        Self {
            source,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// 연간 기준 수익률을 설정합니다.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 기본 거래소 기준으로 기간의 CRO를 계산합니다.
    pub async fn calculate(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> f64 {
        self.calculate_query(&HistoryQuery::new(symbol, from, to))
            .await
    }

    /// 조회 조건으로 CRO를 계산합니다.
    pub async fn calculate_query(&self, query: &HistoryQuery) -> f64 {
        self.breakdown(query)
            .await
            .map(|b| b.value)
            .unwrap_or(0.0)
    }

    /// 조회 조건으로 CRO 중간값을 계산합니다. 퇴화된 경우 `None`.
    pub async fn breakdown(&self, query: &HistoryQuery) -> Option<CroBreakdown> {
        let span = market_span!("cro", query.symbol, query.exchange);
        async {
            let table = match self.source.price_history(query).await {
                Ok(table) => table,
                Err(e) => {
                    warn!(source = self.source.name(), error = %e, "가격 이력 조회 실패, CRO = 0");
                    return None;
                }
            };

            if table.is_empty() {
                info!("가격 이력 없음, CRO = 0");
                return None;
            }

            match compute_cro_breakdown(&table.returns(), self.threshold) {
                Ok(breakdown) => {
                    debug!(
                        positives = breakdown.positive.count,
                        non_positives = breakdown.non_positive.count,
                        value = breakdown.value,
                        "CRO 계산"
                    );
                    Some(breakdown)
                }
                Err(e) => {
                    info!(error = %e, zero_spread = e.is_degenerate(), "통계적으로 퇴화된 수익률, CRO = 0");
                    None
                }
            }
        }
        .instrument(span)
        .await
    }
}
