//! 에러 타입 정의.

use std::path::PathBuf;
use thiserror::Error;

/// 배치 실행 에러 타입
#[derive(Debug, Error)]
pub enum PrepareError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(#[from] config::ConfigError),

    /// 카탈로그 파싱 에러
    #[error("카탈로그를 해석할 수 없음: {0}")]
    Catalog(#[from] toml::de::Error),

    /// 카탈로그 내용 에러 (중복 ID 등)
    #[error("잘못된 카탈로그: {0}")]
    InvalidCatalog(String),

    /// 입력 데이터 에러
    #[error(transparent)]
    Data(#[from] dex_data::DataError),

    /// 요약 에러
    #[error(transparent)]
    Summary(#[from] dex_summary::SummaryError),

    /// 수집기가 보고한 실패 (빈 입력)
    #[error("데이터 없음: {0}")]
    EmptyInput(String),

    /// 출력 직렬화 에러
    #[error("JSON 직렬화 실패: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 파일 입출력 에러
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrepareError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, PrepareError>;
