//! # Dex Core
//!
//! 데이터 쇼케이스 파이프라인의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 다른 모든 크레이트가 공유하는 기본 타입을 제공합니다:
//! - 외부 수집기가 넘겨주는 표 형태 입력 (`Table`)
//! - 데이터셋 디스크립터 및 유형 태그
//! - 타임스탬프 파싱/포맷 헬퍼
//! - 통계 반올림 및 집계 헬퍼
//! - 로깅 인프라

pub mod dataset;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod serde_helpers;
pub mod table;
pub mod time;

pub use dataset::{DatasetDescriptor, DatasetType, Policy};
pub use error::CoreError;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use numeric::{round4, ValueStats};
pub use table::{Row, Table};
