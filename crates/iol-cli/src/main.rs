//! InvertirOnline 시장 데이터 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # GGAL 일봉 이력 (BCBA)
//! iol prices -s GGAL -f 2023-01-01 -t 2023-12-31
//!
//! # 아르헨티나 주식 목록
//! iol symbols -c argentina -k acciones
//!
//! # 당일 장중 체결
//! iol intraday -s GGAL
//!
//! # 옵션 체인 (풋)
//! iol options -s GGAL --side puts
//!
//! # CRO
//! iol cro -s GGAL -f 2023-01-01 -t 2023-12-31 --threshold 0.5
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iol_core::{
    init_logging, AppConfig, HistoryQuery, OptionSide, DEFAULT_COUNTRY, DEFAULT_INSTRUMENT,
};
use iol_data::IolClient;
use tracing::debug;

mod commands;

use commands::cro::run_cro;
use commands::intraday::{run_intraday, IntradayArgs};
use commands::options::run_options;
use commands::output::OutputFormat;
use commands::prices::run_prices;
use commands::show_config::run_show_config;
use commands::symbols::{run_resolve, run_symbols};

#[derive(Parser)]
#[command(name = "iol")]
#[command(about = "InvertirOnline 시장 데이터 CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/default.toml, 없으면 기본값)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 출력 형식 (table, csv, json)
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// 출력 파일 경로 (기본: stdout)
    #[arg(short, long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 일봉 가격 이력
    Prices {
        /// 심볼 (예: GGAL, AAPL)
        #[arg(short, long, default_value = "GGAL")]
        symbol: String,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long, default_value = "2020-01-01")]
        from: String,

        /// 종료 날짜 (YYYY-MM-DD, 포함)
        #[arg(short, long, default_value = "2023-01-01")]
        to: String,

        /// 거래소 (기본: 설정의 market.default_exchange)
        #[arg(short, long)]
        exchange: Option<String>,
    },

    /// 시세 목록 페이지의 심볼 디렉토리
    Symbols {
        /// 국가 (argentina, estados-unidos 등)
        #[arg(short, long, default_value = DEFAULT_COUNTRY)]
        country: String,

        /// 상품 유형 (acciones, opciones, bonos, cedears)
        #[arg(short = 'k', long = "kind", default_value = DEFAULT_INSTRUMENT)]
        kind: String,
    },

    /// 심볼의 내부 ID
    Resolve {
        /// 심볼
        #[arg(short, long)]
        symbol: String,

        /// 국가
        #[arg(short, long, default_value = DEFAULT_COUNTRY)]
        country: String,

        /// 상품 유형
        #[arg(short = 'k', long = "kind", default_value = DEFAULT_INSTRUMENT)]
        kind: String,
    },

    /// 당일 장중 체결
    Intraday {
        /// 심볼
        #[arg(short, long, default_value = "GGAL")]
        symbol: String,

        /// 국가
        #[arg(short, long, default_value = DEFAULT_COUNTRY)]
        country: String,

        /// 상품 유형
        #[arg(short = 'k', long = "kind", default_value = DEFAULT_INSTRUMENT)]
        kind: String,

        /// 거래소 (BCBA, NASDAQ)
        #[arg(short, long)]
        exchange: Option<String>,
    },

    /// 옵션 체인
    Options {
        /// 기초자산 심볼
        #[arg(short, long, default_value = "GGAL")]
        symbol: String,

        /// 방향 (calls, puts)
        #[arg(long, default_value = "calls")]
        side: String,
    },

    /// CRO 통계
    Cro {
        /// 심볼
        #[arg(short, long, default_value = "GGAL")]
        symbol: String,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long, default_value = "2020-01-01")]
        from: String,

        /// 종료 날짜 (YYYY-MM-DD, 포함)
        #[arg(short, long, default_value = "2023-01-01")]
        to: String,

        /// 거래소 (기본: 설정의 market.default_exchange)
        #[arg(short, long)]
        exchange: Option<String>,

        /// 연간 기준 수익률 (0.5 = 50%)
        #[arg(long, default_value_t = iol_analytics::DEFAULT_THRESHOLD)]
        threshold: f64,
    },

    /// 유효 설정 출력
    Config,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => AppConfig::load_default().context("Failed to load default config"),
    }
}

fn build_client(config: &AppConfig) -> Result<IolClient> {
    IolClient::from_config(config).context("Failed to build HTTP client")
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env가 없어도 무시
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    init_logging(config.logging.to_log_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    debug!(base_url = %config.http.base_url, timezone = %config.market.timezone, "설정 로드");

    let format = OutputFormat::parse(&cli.format)?;
    let output = cli.output.as_deref();
    let default_exchange = config.market.default_exchange.clone();

    match cli.command {
        Commands::Prices {
            symbol,
            from,
            to,
            exchange,
        } => {
            let query = HistoryQuery::parse(symbol, &from, &to)?
                .with_exchange(exchange.unwrap_or(default_exchange));
            run_prices(&build_client(&config)?, &query, format, output).await
        }
        Commands::Symbols { country, kind } => {
            run_symbols(&build_client(&config)?, &country, &kind, format, output).await
        }
        Commands::Resolve {
            symbol,
            country,
            kind,
        } => {
            let client = build_client(&config)?;
            run_resolve(&client, &symbol, &country, &kind, format, output).await
        }
        Commands::Intraday {
            symbol,
            country,
            kind,
            exchange,
        } => {
            let args = IntradayArgs {
                symbol,
                country,
                kind,
                exchange: exchange.unwrap_or(default_exchange),
            };
            run_intraday(&build_client(&config)?, &args, format, output).await
        }
        Commands::Options { symbol, side } => {
            let side: OptionSide = side.parse().map_err(anyhow::Error::msg)?;
            run_options(&build_client(&config)?, &symbol, side, format, output).await
        }
        Commands::Cro {
            symbol,
            from,
            to,
            exchange,
            threshold,
        } => {
            let query = HistoryQuery::parse(symbol, &from, &to)?
                .with_exchange(exchange.unwrap_or(default_exchange));
            run_cro(&build_client(&config)?, &query, threshold, format, output).await
        }
        Commands::Config => run_show_config(&config, format, output),
    }
}
