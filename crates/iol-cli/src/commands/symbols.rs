//! 심볼 디렉토리 / 내부 ID 조회 명령어.
//!
//! ```bash
//! iol symbols -c argentina -k acciones
//! iol symbols -c estados-unidos --format json
//! iol resolve -s GGAL
//! ```

use anyhow::{bail, Context, Result};
use iol_core::{SymbolDirectory, SymbolEntry};
use iol_data::{DirectoryOutcome, IolClient};
use serde::Serialize;
use tracing::info;

use super::output::{escape_csv, format_json, spinner, truncate, write_output, OutputFormat};

/// 심볼 디렉토리를 조회하여 출력합니다.
pub async fn run_symbols(
    client: &IolClient,
    country: &str,
    kind: &str,
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let pb = spinner(format!("Fetching {} {} listings...", country, kind));
    let result = client.fetch_symbol_directory(country, kind).await;
    pb.finish_and_clear();

    let directory = match result.context("Failed to fetch symbol listings")? {
        DirectoryOutcome::Listed(directory) => directory,
        DirectoryOutcome::Unavailable { status, url } => {
            bail!("Listing page unavailable: HTTP {} ({})", status, url)
        }
        DirectoryOutcome::Unsupported {
            country,
            instrument,
        } => bail!(
            "Unsupported listing: country={}, type={}. \
             Supported: argentina/acciones, */opciones, */bonos, */cedears, estados-unidos/*",
            country,
            instrument
        ),
    };
    info!(count = directory.len(), "심볼 디렉토리 조회 완료");

    let content = match format {
        OutputFormat::Table => format_table(&directory),
        OutputFormat::Csv => format_csv(&directory),
        OutputFormat::Json => format_json(directory.entries())?,
    };

    write_output(&content, output_path)
}

/// 내부 ID 조회 결과.
#[derive(Debug, Serialize)]
struct Resolved<'a> {
    symbol: &'a str,
    country: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    id: String,
}

/// 심볼의 내부 ID를 조회하여 출력합니다.
pub async fn run_resolve(
    client: &IolClient,
    symbol: &str,
    country: &str,
    kind: &str,
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let pb = spinner(format!("Resolving {}...", symbol));
    let result = client.resolve_internal_id(symbol, country, kind).await;
    pb.finish_and_clear();

    let id = result.with_context(|| format!("Failed to resolve {}", symbol))?;
    let resolved = Resolved {
        symbol,
        country,
        kind,
        id: id.to_string(),
    };

    let content = match format {
        OutputFormat::Table => format!("{} → {}", resolved.symbol, resolved.id),
        OutputFormat::Csv => format!(
            "symbol,country,type,id\n{},{},{},{}\n",
            resolved.symbol, resolved.country, resolved.kind, resolved.id
        ),
        OutputFormat::Json => format_json(&resolved)?,
    };

    write_output(&content, output_path)
}

/// 테이블 형식 출력.
fn format_table(directory: &SymbolDirectory) -> String {
    let mut output = String::new();

    // 헤더
    output.push_str(&format!("{:<14} {:<80}\n", "SYMBOL", "URL"));
    output.push_str(&"-".repeat(95));
    output.push('\n');

    // 데이터
    for SymbolEntry { symbol, url } in directory.iter() {
        output.push_str(&format!("{:<14} {:<80}\n", symbol, truncate(url, 80)));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} symbols", directory.len()));
    output
}

/// CSV 형식 출력.
fn format_csv(directory: &SymbolDirectory) -> String {
    let mut output = String::from("symbol,url\n");

    for entry in directory.iter() {
        output.push_str(&format!(
            "{},{}\n",
            escape_csv(&entry.symbol),
            escape_csv(&entry.url)
        ));
    }

    output
}
