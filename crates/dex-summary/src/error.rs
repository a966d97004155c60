//! 요약 에러 타입.

use thiserror::Error;

/// 데이터셋 요약 중 발생하는 에러.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// 필수 컬럼 없음
    #[error("필수 컬럼 없음: {0}")]
    MissingColumn(String),

    /// 레코드 스키마 불일치
    #[error("{row}번째 행을 읽을 수 없음: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    /// 파싱할 수 없는 날짜
    #[error("{row}번째 행의 {column} 값을 날짜로 해석할 수 없음: {value}")]
    InvalidTimestamp {
        column: &'static str,
        row: usize,
        value: String,
    },
}

/// 요약 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, SummaryError>;
