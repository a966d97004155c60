//! 데이터 Provider trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dex_core::{DatasetDescriptor, Table};

use crate::Result;

/// 한 데이터셋의 조회 결과.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// 조회된 표 (비어 있을 수 있음)
    pub table: Table,
    /// 데이터 위치 (파일 경로, "memory" 등)
    pub location: String,
    /// 원본 형식 (csv, json, table 등)
    pub format: String,
    /// 수집기가 보고한 실패 사유
    pub reason: Option<String>,
    /// 수집 시각 (수집기가 알려준 경우)
    pub fetched_at: Option<DateTime<Utc>>,
}

impl FetchOutcome {
    /// 표와 출처로 결과를 생성합니다.
    pub fn new(table: Table, location: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            table,
            location: location.into(),
            format: format.into(),
            reason: None,
            fetched_at: None,
        }
    }

    /// 빈 결과를 생성합니다.
    pub fn empty(location: impl Into<String>, reason: Option<String>) -> Self {
        Self {
            location: location.into(),
            reason,
            ..Default::default()
        }
    }

    /// 실패 사유를 설정합니다.
    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    /// 수집 시각을 설정합니다.
    pub fn with_fetched_at(mut self, fetched_at: Option<DateTime<Utc>>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// 입력 행이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// 데이터셋 입력 Provider.
///
/// 러너는 전역 객체 대신 이 trait을 구현한 값을 주입받습니다.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 데이터셋 하나의 입력 표를 조회합니다.
    async fn fetch(&self, descriptor: &DatasetDescriptor) -> Result<FetchOutcome>;
}
