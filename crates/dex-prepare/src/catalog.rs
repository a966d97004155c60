//! 데이터셋 카탈로그.
//!
//! 기본 카탈로그(`catalog/datasets.toml`)는 바이너리에 포함되며,
//! `--catalog` 옵션이나 `catalog` 설정으로 다른 TOML 파일을 지정할 수 있습니다.

use dex_core::{DatasetDescriptor, DatasetType};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{PrepareError, Result};

const BUILTIN_CATALOG: &str = include_str!("../catalog/datasets.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "dataset")]
    datasets: Vec<RawEntry>,
}

/// 유형 태그를 문자열로 받아 알 수 없는 유형을 건너뛸 수 있게 합니다.
#[derive(Debug, Deserialize)]
struct RawEntry {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    primary_keys: Vec<String>,
    #[serde(default)]
    restricted: bool,
    #[serde(default)]
    params: serde_json::Value,
}

/// 순서가 유지되는 데이터셋 목록.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    datasets: Vec<DatasetDescriptor>,
}

impl Catalog {
    /// 바이너리에 포함된 기본 카탈로그.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// 파일에서 카탈로그를 로드합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PrepareError::io(path, e))?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            datasets = catalog.len(),
            "카탈로그 로드 완료"
        );
        Ok(catalog)
    }

    /// 경로가 있으면 파일에서, 없으면 기본 카탈로그를 로드합니다.
    pub async fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path).await,
            None => Self::builtin(),
        }
    }

    /// TOML 문자열을 파싱합니다.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;

        let mut seen = HashSet::new();
        let mut datasets = Vec::with_capacity(file.datasets.len());
        for entry in file.datasets {
            if !seen.insert(entry.id.clone()) {
                return Err(PrepareError::InvalidCatalog(format!(
                    "중복된 데이터셋 ID: {}",
                    entry.id
                )));
            }

            let kind: DatasetType = match entry.kind.parse() {
                Ok(kind) => kind,
                Err(e) => {
                    tracing::warn!(dataset = %entry.id, error = %e, "알 수 없는 유형, 건너뜀");
                    continue;
                }
            };

            datasets.push(DatasetDescriptor {
                id: entry.id,
                kind,
                description: entry.description,
                primary_keys: entry.primary_keys,
                restricted: entry.restricted,
                params: entry.params,
            });
        }

        Ok(Self { datasets })
    }

    pub fn datasets(&self) -> &[DatasetDescriptor] {
        &self.datasets
    }

    pub fn get(&self, id: &str) -> Option<&DatasetDescriptor> {
        self.datasets.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// 지정한 ID만 남깁니다. 카탈로그에 없는 ID는 경고합니다.
    pub fn retain_only(&mut self, ids: &[String]) {
        for id in ids {
            if self.get(id).is_none() {
                tracing::warn!(dataset = %id, "카탈로그에 없는 데이터셋");
            }
        }
        self.datasets.retain(|d| ids.iter().any(|id| *id == d.id));
    }
}
