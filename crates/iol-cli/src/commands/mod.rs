//! CLI 명령어 구현 모듈.

pub mod cro;
pub mod intraday;
pub mod options;
pub mod output;
pub mod prices;
pub mod show_config;
pub mod symbols;

// 각 서브모듈 직접 사용 권장 (ambiguous re-export 방지)
