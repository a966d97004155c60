//! 외부 수집기 저장소 Provider.
//!
//! 수집기는 저장소 루트에 `index.json`을 두고, 데이터셋마다 레코드 파일
//! 위치를 기록합니다:
//!
//! ```json
//! {
//!   "datasets": {
//!     "us_indices": {
//!       "name": "us_indices",
//!       "file_path": "raw/us_indices.csv",
//!       "fetched_at": "2024-06-01T12:00:00Z"
//!     },
//!     "fred_gdp": { "file_path": "raw/fred_gdp.json", "error": "API key missing" }
//!   }
//! }
//! ```
//!
//! 상대 경로는 저장소 루트 기준으로 해석합니다.

mod reader;

pub use reader::RecordFormat;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dex_core::time::parse_timestamp_str;
use dex_core::DatasetDescriptor;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{DataError, DataProvider, FetchOutcome, Result};

/// 인덱스 파일 이름
pub const INDEX_FILE: &str = "index.json";

/// 인덱스 항목 하나.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexEntry {
    /// 데이터셋 이름 (키와 다를 수 있음)
    #[serde(default)]
    pub name: Option<String>,
    /// 레코드 파일 경로
    pub file_path: String,
    /// 명시적 형식 (없으면 확장자로 추론)
    #[serde(default)]
    pub format: Option<String>,
    /// 수집기가 기록한 실패 사유
    #[serde(default, alias = "last_error")]
    pub error: Option<String>,
    /// 수집 시각
    #[serde(default)]
    pub fetched_at: Option<String>,
}

impl IndexEntry {
    fn record_format(&self, path: &Path) -> Result<RecordFormat> {
        match &self.format {
            Some(format) => format.parse(),
            None => RecordFormat::from_path(path),
        }
    }

    fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at.as_deref().and_then(parse_timestamp_str)
    }
}

/// 수집기 인덱스.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageIndex {
    #[serde(default)]
    pub datasets: BTreeMap<String, IndexEntry>,
}

impl StorageIndex {
    /// 키 또는 `name` 필드로 항목을 찾습니다.
    pub fn lookup(&self, id: &str) -> Option<&IndexEntry> {
        self.datasets.get(id).or_else(|| {
            self.datasets
                .values()
                .find(|entry| entry.name.as_deref() == Some(id))
        })
    }
}

/// 수집기 저장 디렉토리를 읽는 Provider.
#[derive(Debug, Clone)]
pub struct StorageProvider {
    root: PathBuf,
    index: StorageIndex,
}

impl StorageProvider {
    /// 저장소 루트의 인덱스를 읽어 Provider를 엽니다.
    ///
    /// 인덱스가 없으면 `DataError::MissingIndex`를 반환합니다.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let index_path = root.join(INDEX_FILE);

        let bytes = match tokio::fs::read(&index_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataError::MissingIndex(index_path));
            }
            Err(e) => return Err(DataError::io(index_path, e)),
        };

        let index: StorageIndex = serde_json::from_slice(&bytes)?;
        debug!(
            root = %root.display(),
            datasets = index.datasets.len(),
            "저장소 인덱스 로드 완료"
        );

        Ok(Self { root, index })
    }

    fn resolve(&self, file_path: &str) -> PathBuf {
        let path = Path::new(file_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl DataProvider for StorageProvider {
    fn name(&self) -> &str {
        "storage"
    }

    async fn fetch(&self, descriptor: &DatasetDescriptor) -> Result<FetchOutcome> {
        let Some(entry) = self.index.lookup(&descriptor.id) else {
            debug!(dataset = %descriptor.id, "인덱스에 없는 데이터셋");
            return Ok(FetchOutcome::empty(
                self.root.join(INDEX_FILE).display().to_string(),
                None,
            ));
        };

        let path = self.resolve(&entry.file_path);
        let location = path.display().to_string();

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DataError::io(&path, e))?;
        if !exists {
            warn!(dataset = %descriptor.id, path = %location, "레코드 파일 없음");
            return Ok(FetchOutcome::empty(location, entry.error.clone()));
        }

        let format = entry.record_format(&path)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| DataError::io(&path, e))?;
        let table = format.read(&bytes)?;

        debug!(
            dataset = %descriptor.id,
            format = %format,
            records = table.len(),
            "레코드 파일 로드 완료"
        );

        Ok(FetchOutcome::new(table, location, format.as_str())
            .with_reason(entry.error.clone())
            .with_fetched_at(entry.fetched_at()))
    }
}
