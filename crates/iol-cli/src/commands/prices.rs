//! 일봉 가격 이력 조회 명령어.
//!
//! ```bash
//! iol prices -s GGAL -f 2023-01-01 -t 2023-12-31
//! iol prices -s AAPL -e NASDAQ --format csv -o data/aapl.csv
//! ```

use anyhow::{Context, Result};
use iol_core::{HistoryQuery, PriceTable};
use iol_data::IolClient;
use tracing::info;

use super::output::{format_json, spinner, write_output, OutputFormat};

/// 가격 이력을 조회하여 출력합니다.
pub async fn run_prices(
    client: &IolClient,
    query: &HistoryQuery,
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let pb = spinner(format!(
        "Fetching {} ({}) {} ~ {}...",
        query.symbol, query.exchange, query.from, query.to
    ));
    let result = client.fetch_price_history(query).await;
    pb.finish_and_clear();

    let table = result
        .with_context(|| format!("Failed to fetch price history for {}", query.symbol))?;
    info!(symbol = %query.symbol, rows = table.len(), "가격 이력 조회 완료");

    let content = match format {
        OutputFormat::Table => format_table(&table),
        OutputFormat::Csv => format_csv(&table),
        OutputFormat::Json => format_json(&table)?,
    };

    write_output(&content, output_path)
}

/// 테이블 형식 출력.
fn format_table(table: &PriceTable) -> String {
    let mut output = String::new();

    // 헤더
    let c = PriceTable::COLUMNS;
    output.push_str(&format!(
        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>16}\n",
        c[0], c[1], c[2], c[3], c[4], c[5], c[6]
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    // 데이터
    for row in table {
        output.push_str(&format!(
            "{:<12} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>16.0}\n",
            row.fecha, row.apertura, row.maximo, row.minimo, row.cierre, row.rendimiento, row.volumen
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} rows", table.len()));
    output
}

/// CSV 형식 출력.
fn format_csv(table: &PriceTable) -> String {
    let mut output = PriceTable::COLUMNS.join(",");
    output.push('\n');

    for row in table {
        output.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            row.fecha, row.apertura, row.maximo, row.minimo, row.cierre, row.rendimiento, row.volumen
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use iol_core::PriceRow;

    fn sample() -> PriceTable {
        PriceTable::new(vec![
            PriceRow {
                fecha: "2020-01-01".to_string(),
                apertura: 10.0,
                maximo: 11.0,
                minimo: 9.0,
                cierre: 10.0,
                rendimiento: 0.0,
                volumen: 100.0,
            },
            PriceRow {
                fecha: "2020-01-02".to_string(),
                apertura: 10.0,
                maximo: 12.0,
                minimo: 10.0,
                cierre: 11.0,
                rendimiento: 10.0,
                volumen: 200.0,
            },
        ])
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "fecha,apertura,maximo,minimo,cierre,rendimiento,volumen"
        );
        assert_eq!(lines[2], "2020-01-02,10,12,10,11,10,200");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_format_table_empty() {
        let table = format_table(&PriceTable::default());
        assert!(table.starts_with("fecha"));
        assert!(table.ends_with("Total: 0 rows"));
    }
}
