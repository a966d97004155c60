//! 데이터 모듈 오류 타입.

use std::path::PathBuf;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 입출력 오류
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 수집기 인덱스 파일 없음
    #[error("Storage index not found at {0}")]
    MissingIndex(PathBuf),

    /// CSV 파싱 오류
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON 파싱 오류
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 지원하지 않는 레코드 파일 형식
    #[error("Unsupported record format: {0}")]
    UnsupportedFormat(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl DataError {
    /// 경로가 포함된 I/O 오류를 생성합니다.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
