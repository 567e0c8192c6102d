//! 옵션 체인 조회 명령어.
//!
//! ```bash
//! iol options -s GGAL --side calls
//! iol options -s GGAL --side puts --format csv
//! ```

use anyhow::{Context, Result};
use iol_core::{OptionChain, OptionRow, OptionSide};
use iol_data::IolClient;
use rust_decimal::Decimal;
use tracing::info;

use super::output::{format_json, or_dash, spinner, write_output, OutputFormat};

/// 옵션 체인을 조회하여 출력합니다.
pub async fn run_options(
    client: &IolClient,
    symbol: &str,
    side: OptionSide,
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let pb = spinner(format!("Fetching {} {}...", symbol, side));
    let result = client.fetch_option_chain(symbol, side).await;
    pb.finish_and_clear();

    let chain = result.with_context(|| format!("Failed to fetch {} options for {}", side, symbol))?;
    info!(symbol, side = %side, rows = chain.len(), "옵션 체인 조회 완료");

    let content = match format {
        OutputFormat::Table => format_table(&chain),
        OutputFormat::Csv => format_csv(&chain),
        OutputFormat::Json => format_json(&chain)?,
    };

    write_output(&content, output_path)
}

/// 테이블 형식 출력.
fn format_table(chain: &OptionChain) -> String {
    let mut output = String::new();
    let c = OptionRow::COLUMNS;

    output.push_str(&format!(
        "{:<14} {:>10} {:>10} {:>10} {:>10} {:>10} {:>14} {:>10} {:>10} {:<12}\n",
        c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7], c[8], c[9]
    ));
    output.push_str(&"-".repeat(118));
    output.push('\n');

    for row in &chain.rows {
        output.push_str(&format!(
            "{:<14} {:>10} {:>10} {:>10} {:>10} {:>10} {:>14} {:>10} {:>10} {:<12}\n",
            row.label,
            or_dash(row.last),
            or_dash(row.variation),
            or_dash(row.open),
            or_dash(row.high),
            or_dash(row.low),
            or_dash(row.last_close),
            or_dash(row.close),
            or_dash(row.volume),
            row.date
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} {} for {}", chain.len(), chain.side, chain.symbol));
    output
}

fn csv_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// CSV 형식 출력. 비어 있는 셀은 빈 값입니다.
fn format_csv(chain: &OptionChain) -> String {
    let mut output = OptionRow::COLUMNS.join(",");
    output.push('\n');

    for row in &chain.rows {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            row.label,
            csv_cell(row.last),
            csv_cell(row.variation),
            csv_cell(row.open),
            csv_cell(row.high),
            csv_cell(row.low),
            csv_cell(row.last_close),
            csv_cell(row.close),
            csv_cell(row.volume),
            row.date
        ));
    }

    output
}
