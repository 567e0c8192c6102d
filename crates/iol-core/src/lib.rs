//! # IOL Core
//!
//! InvertirOnline 시세 수집기의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 수집 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일봉(Bar), 체결(Tick), 옵션 체인 구조체
//! - 원시 레코드를 표 형태로 바꾸는 정규화 함수
//! - 심볼 디렉토리 및 내부 ID
//! - 시장 시계(타임존) 처리
//! - 설정 관리
//! - 로깅 인프라

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
