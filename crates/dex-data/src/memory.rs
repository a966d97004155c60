//! 메모리 내 Provider.

use async_trait::async_trait;
use dex_core::{DatasetDescriptor, Table};
use std::collections::HashMap;

use crate::{DataError, DataProvider, FetchOutcome, Result};

#[derive(Debug, Clone)]
enum Entry {
    Table { table: Table, reason: Option<String> },
    Failure(String),
}

/// 미리 등록한 표를 돌려주는 Provider.
///
/// 등록되지 않은 데이터셋은 사유 없는 빈 표로 응답합니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    entries: HashMap<String, Entry>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 데이터셋 표를 등록합니다.
    pub fn with_table(mut self, id: impl Into<String>, table: Table) -> Self {
        self.entries
            .insert(id.into(), Entry::Table { table, reason: None });
        self
    }

    /// 수집기가 실패 사유와 함께 빈 결과를 낸 상황을 등록합니다.
    pub fn with_empty(mut self, id: impl Into<String>, reason: Option<String>) -> Self {
        self.entries.insert(
            id.into(),
            Entry::Table {
                table: Table::empty(),
                reason,
            },
        );
        self
    }

    /// 조회 자체가 실패하는 데이터셋을 등록합니다.
    pub fn with_failure(mut self, id: impl Into<String>, message: impl Into<String>) -> Self {
        self.entries.insert(id.into(), Entry::Failure(message.into()));
        self
    }
}

#[async_trait]
impl DataProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, descriptor: &DatasetDescriptor) -> Result<FetchOutcome> {
        match self.entries.get(&descriptor.id) {
            Some(Entry::Table { table, reason }) => {
                Ok(FetchOutcome::new(table.clone(), "memory", "table").with_reason(reason.clone()))
            }
            Some(Entry::Failure(message)) => Err(DataError::Fetch(message.clone())),
            None => Ok(FetchOutcome::empty("memory", None)),
        }
    }
}
