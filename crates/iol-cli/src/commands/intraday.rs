//! 장중 체결 조회 명령어.
//!
//! ```bash
//! iol intraday -s GGAL
//! iol intraday -s AAPL -c estados-unidos -e NASDAQ
//! ```

use anyhow::{Context, Result};
use iol_core::IntradayTable;
use iol_data::IolClient;
use tracing::info;

use super::output::{format_json, spinner, write_output, OutputFormat};

/// 장중 조회 인자.
#[derive(Debug, Clone)]
pub struct IntradayArgs {
    pub symbol: String,
    pub country: String,
    pub kind: String,
    pub exchange: String,
}

/// 당일 장중 체결을 조회하여 출력합니다.
pub async fn run_intraday(
    client: &IolClient,
    args: &IntradayArgs,
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let pb = spinner(format!("Fetching {} intraday ({})...", args.symbol, args.exchange));
    let result = client
        .fetch_intraday(&args.symbol, &args.country, &args.kind, &args.exchange)
        .await;
    pb.finish_and_clear();

    let table =
        result.with_context(|| format!("Failed to fetch intraday data for {}", args.symbol))?;
    info!(symbol = %args.symbol, rows = table.len(), "장중 체결 조회 완료");

    let content = match format {
        OutputFormat::Table => format_table(&table),
        OutputFormat::Csv => format_csv(&table),
        OutputFormat::Json => format_json(&table)?,
    };

    write_output(&content, output_path)
}

/// 테이블 형식 출력.
fn format_table(table: &IntradayTable) -> String {
    let mut output = String::new();

    let c = IntradayTable::COLUMNS;
    output.push_str(&format!("{:<10} {:>14} {:>14}\n", c[0], c[1], c[2]));
    output.push_str(&"-".repeat(40));
    output.push('\n');

    for row in table.iter() {
        output.push_str(&format!(
            "{:<10} {:>14} {:>14.2}\n",
            row.hora, row.nominales, row.precio
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} trades", table.len()));
    output
}

/// CSV 형식 출력.
fn format_csv(table: &IntradayTable) -> String {
    let mut output = IntradayTable::COLUMNS.join(",");
    output.push('\n');

    for row in table.iter() {
        output.push_str(&format!("{},{},{}\n", row.hora, row.nominales, row.precio));
    }

    output
}
