//! 기초 통계.

use serde::Serialize;

/// 산술 평균. 빈 입력은 `None`.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 표본 표준편차 (n - 1 분모).
///
/// 빈 입력은 `None`, 원소가 하나면 0.0입니다.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    if values.len() < 2 {
        return Some(0.0);
    }

    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// 한 부분집합의 요약 통계.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartitionStats {
    /// 원소 수
    pub count: usize,
    /// 평균
    pub mean: f64,
    /// 표본 표준편차
    pub std: f64,
}

impl PartitionStats {
    /// 빈 입력이면 `None`.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Some(Self {
            count: values.len(),
            mean: mean(values)?,
            std: sample_std(values)?,
        })
    }
}
