//! CRO 계산 명령어.
//!
//! ```bash
//! iol cro -s GGAL -f 2023-01-01 -t 2023-12-31
//! iol cro -s AAPL --threshold 0.3 --format json
//! ```

use std::sync::Arc;

use anyhow::Result;
use iol_analytics::{CroBreakdown, CroCalculator};
use iol_core::HistoryQuery;
use iol_data::IolClient;
use serde::Serialize;

use super::output::{format_json, spinner, write_output, OutputFormat};

/// CRO 계산 결과.
#[derive(Debug, Serialize)]
struct CroReport<'a> {
    symbol: &'a str,
    exchange: &'a str,
    from: String,
    to: String,
    threshold: f64,
    cro: f64,
    breakdown: Option<CroBreakdown>,
}

/// CRO를 계산하여 출력합니다. 계산할 수 없는 경우 0을 출력합니다.
pub async fn run_cro(
    client: &IolClient,
    query: &HistoryQuery,
    threshold: f64,
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let calculator = CroCalculator::new(Arc::new(client.clone())).with_threshold(threshold);

    let pb = spinner(format!("Computing CRO for {}...", query.symbol));
    let breakdown = calculator.breakdown(query).await;
    pb.finish_and_clear();

    let report = CroReport {
        symbol: &query.symbol,
        exchange: &query.exchange,
        from: query.from.to_string(),
        to: query.to.to_string(),
        threshold,
        cro: breakdown.map(|b| b.value).unwrap_or(0.0),
        breakdown,
    };

    let content = match format {
        OutputFormat::Table => format_table(&report),
        OutputFormat::Csv => format_csv(&report),
        OutputFormat::Json => format_json(&report)?,
    };

    write_output(&content, output_path)
}

/// 테이블 형식 출력.
fn format_table(report: &CroReport<'_>) -> String {
    let mut output = format!(
        "CRO {} ({}) {} ~ {} [threshold {}]: {:.6}\n",
        report.symbol, report.exchange, report.from, report.to, report.threshold, report.cro
    );

    if let Some(b) = &report.breakdown {
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<14} {:>8} {:>16} {:>16}\n",
            "PARTITION", "COUNT", "MEAN", "STD"
        ));
        output.push_str(&format!(
            "{:<14} {:>8} {:>16.6} {:>16.6}\n",
            "positive", b.positive.count, b.positive.mean, b.positive.std
        ));
        output.push_str(&format!(
            "{:<14} {:>8} {:>16.6} {:>16.6}\n",
            "non-positive", b.non_positive.count, b.non_positive.mean, b.non_positive.std
        ));
        output.push_str(&format!("daily rate: {:.8}", b.daily_rate));
    } else {
        output.push_str("(no usable price history)");
    }

    output
}

/// CSV 형식 출력.
fn format_csv(report: &CroReport<'_>) -> String {
    format!(
        "symbol,exchange,from,to,threshold,cro\n{},{},{},{},{},{}\n",
        report.symbol, report.exchange, report.from, report.to, report.threshold, report.cro
    )
}
