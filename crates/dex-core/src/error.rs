//! 도메인 공통 에러 타입.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// 알 수 없는 데이터셋 유형 태그
    #[error("알 수 없는 데이터셋 유형: {0}")]
    UnknownDatasetType(String),
}
