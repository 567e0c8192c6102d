//! 유효 설정 출력 명령어.

use anyhow::{Context, Result};
use iol_core::AppConfig;

use super::output::{format_json, write_output, OutputFormat};

/// 기본값, 설정 파일, 환경 변수를 모두 반영한 설정을 출력합니다.
///
/// 테이블/CSV 형식 요청은 TOML로 출력합니다.
pub fn run_show_config(
    config: &AppConfig,
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let content = match format {
        OutputFormat::Json => format_json(config)?,
        OutputFormat::Table | OutputFormat::Csv => {
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?
        }
    };

    write_output(&content, output_path)
}
