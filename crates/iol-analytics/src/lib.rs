//! 가격 이력 기반 통계.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 표본 통계 (평균, 표본 표준편차)
//! - CRO (상승/하락 수익률 분포 비율) 계산
//!
//! # Re-exports
//!
//! - [`cro`]: CRO 계산 (`compute_cro`, `CroCalculator`)
//! - [`stats`]: 기초 통계

pub mod cro;
pub mod stats;

pub use cro::{
    compute_cro, compute_cro_breakdown, daily_threshold_rate, CroBreakdown, CroCalculator,
    DEFAULT_THRESHOLD, RATE_DAYS,
};
pub use stats::{mean, sample_std, PartitionStats};
