//! 출력 형식과 공통 출력 유틸리티.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        let format = match s.trim().to_ascii_lowercase().as_str() {
            "table" => Self::Table,
            "csv" => Self::Csv,
            "json" => Self::Json,
            other => bail!("unknown output format '{}' (table, csv, json)", other),
        };
        Ok(format)
    }
}

/// `output_path`가 있으면 파일(상위 디렉토리 생성 포함)에, 없으면 stdout에 씁니다.
pub fn write_output(content: &str, output_path: Option<&str>) -> Result<()> {
    let Some(path) = output_path.map(Path::new) else {
        println!("{}", content);
        return Ok(());
    };

    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("cannot create directory {}", dir.display()))?,
        _ => {}
    }
    fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "출력 저장");
    Ok(())
}

/// JSON 형식 출력.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize to JSON")
}

/// 요청 진행 중 표시할 스피너 (stderr).
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message.into());
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// 최대 `max_len` 문자로 줄이고 잘린 경우 `...`를 붙입니다.
pub fn truncate(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some(_) => {
            let keep = max_len.saturating_sub(3);
            let end = s.char_indices().nth(keep).map_or(s.len(), |(i, _)| i);
            format!("{}...", &s[..end])
        }
    }
}

/// RFC 4180 규칙으로 CSV 필드를 인용합니다.
pub fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// 선택 값 표시 (없으면 `-`).
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
