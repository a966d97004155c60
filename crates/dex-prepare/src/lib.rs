//! 데이터셋 준비 배치 실행기.
//!
//! 수집기 저장소의 데이터셋을 카탈로그 순서대로 요약하여 정적 사이트가
//! 읽는 JSON 파일로 기록합니다:
//! - `<public_dir>/<name>.json`: 차트용 전체 데이터
//! - `<site_dir>/datasets.json`: 랜딩 페이지용 요약 목록

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod runner;
pub mod stats;

pub use catalog::Catalog;
pub use config::PrepareConfig;
pub use error::{PrepareError, Result};
pub use output::OutputWriter;
pub use runner::{Preparer, RunOptions};
pub use stats::{BatchReport, DatasetFailure};
