//! 출력 파일 기록.
//!
//! - `<public_dir>/<name>.json`: 데이터셋 전체 (compact)
//! - `<site_dir>/datasets.json`: 요약 목록 (pretty, 2칸 들여쓰기)

use dex_summary::{Dataset, DatasetSummary};
use std::path::{Path, PathBuf};

use crate::error::{PrepareError, Result};

/// 집계 파일 이름
pub const AGGREGATE_FILE: &str = "datasets.json";

/// 출력 디렉토리 관리 및 파일 기록.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    public_dir: PathBuf,
    site_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(public_dir: impl Into<PathBuf>, site_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
            site_dir: site_dir.into(),
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// 출력 디렉토리를 준비합니다. `clean`이면 데이터셋 디렉토리를 먼저 비웁니다.
    pub async fn prepare(&self, clean: bool) -> Result<()> {
        if clean {
            match tokio::fs::remove_dir_all(&self.public_dir).await {
                Ok(()) => {
                    tracing::debug!(path = %self.public_dir.display(), "기존 출력 삭제");
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(PrepareError::io(&self.public_dir, e)),
            }
        }

        for dir in [&self.public_dir, &self.site_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| PrepareError::io(dir, e))?;
        }
        Ok(())
    }

    /// 데이터셋 파일 경로.
    pub fn dataset_path(&self, name: &str) -> PathBuf {
        self.public_dir.join(format!("{}.json", name))
    }

    /// 데이터셋 하나를 기록하고 경로를 반환합니다.
    pub async fn write_dataset(&self, dataset: &Dataset) -> Result<PathBuf> {
        let path = self.dataset_path(&dataset.name);
        let body = serde_json::to_vec(dataset)?;
        write_file(&path, body).await?;
        Ok(path)
    }

    /// 요약 목록을 기록하고 경로를 반환합니다.
    pub async fn write_aggregate(&self, summaries: &[DatasetSummary]) -> Result<PathBuf> {
        let path = self.site_dir.join(AGGREGATE_FILE);
        let body = serde_json::to_vec_pretty(summaries)?;
        write_file(&path, body).await?;
        Ok(path)
    }
}

async fn write_file(path: &Path, body: Vec<u8>) -> Result<()> {
    tokio::fs::write(path, body)
        .await
        .map_err(|e| PrepareError::io(path, e))
}
