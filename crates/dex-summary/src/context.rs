//! 요약 컨텍스트 (디스크립터 + 입력 출처).

use chrono::{DateTime, Utc};
use dex_core::time::to_iso;
use dex_core::DatasetDescriptor;

use crate::model::{Dataset, DatasetMeta, DatasetStats, GroupKeys, SampleData};

/// 데이터셋 하나를 요약할 때 필요한 설정과 출처 정보.
#[derive(Debug, Clone)]
pub struct SummaryContext<'a> {
    /// 데이터셋 설정
    pub descriptor: &'a DatasetDescriptor,
    /// 입력 위치
    pub location: String,
    /// 입력 형식
    pub format: String,
    /// 수집 시각
    pub fetched_at: DateTime<Utc>,
}

impl<'a> SummaryContext<'a> {
    pub fn new(descriptor: &'a DatasetDescriptor) -> Self {
        Self {
            descriptor,
            location: "memory".to_string(),
            format: "table".to_string(),
            fetched_at: Utc::now(),
        }
    }

    /// 입력 출처를 설정합니다.
    pub fn with_source(mut self, location: impl Into<String>, format: impl Into<String>) -> Self {
        self.location = location.into();
        self.format = format.into();
        self
    }

    /// 수집 시각을 설정합니다.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    pub(crate) fn meta(
        &self,
        record_count: usize,
        columns: &[String],
        groups: GroupKeys,
    ) -> DatasetMeta {
        let d = self.descriptor;
        DatasetMeta {
            name: d.id.clone(),
            source_id: d.id.clone(),
            location: self.location.clone(),
            format: self.format.clone(),
            record_count,
            columns: columns.to_vec(),
            primary_keys: d.primary_keys.clone(),
            fetched_at: to_iso(&self.fetched_at),
            description: d.description.clone(),
            groups,
        }
    }

    pub(crate) fn dataset(
        &self,
        meta: DatasetMeta,
        stats: DatasetStats,
        data: SampleData,
    ) -> Dataset {
        Dataset {
            name: self.descriptor.id.clone(),
            kind: self.descriptor.kind,
            description: self.descriptor.description.clone(),
            meta,
            stats,
            data,
        }
    }
}
