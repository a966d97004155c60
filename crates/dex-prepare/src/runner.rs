//! 배치 실행기.
//!
//! 카탈로그 순서대로 데이터셋을 하나씩 처리합니다:
//! 조회 → 빈 입력 확인 → 정책 선택 → 집계 → 직렬화 → 기록.
//! 데이터셋 하나의 실패는 기록만 하고 다음 데이터셋으로 넘어갑니다.

use dex_core::{dataset_span, DatasetDescriptor};
use dex_data::DataProvider;
use dex_summary::{DatasetSummary, SummaryContext};
use std::time::Instant;
use tracing::Instrument;

use crate::catalog::Catalog;
use crate::error::{PrepareError, Result};
use crate::output::OutputWriter;
use crate::stats::BatchReport;

/// 실행 옵션
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// 제한 데이터셋 포함 여부
    pub include_restricted: bool,
    /// 실행 전 데이터셋 디렉토리 비우기
    pub clean_output: bool,
    /// 지정 시 해당 ID만 처리
    pub only: Option<Vec<String>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            include_restricted: true,
            clean_output: true,
            only: None,
        }
    }
}

/// 데이터셋 하나의 처리 결과
#[derive(Debug)]
enum Step {
    Written {
        summary: Box<DatasetSummary>,
        records: usize,
    },
    Empty,
}

/// 데이터 준비 배치 실행기.
pub struct Preparer<P> {
    provider: P,
    writer: OutputWriter,
    options: RunOptions,
}

impl<P: DataProvider> Preparer<P> {
    pub fn new(provider: P, writer: OutputWriter) -> Self {
        Self {
            provider,
            writer,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// 카탈로그 전체를 처리합니다.
    ///
    /// 데이터셋별 실패는 `BatchReport::errors`에 기록되며, 출력 디렉토리 준비나
    /// 집계 파일 기록 실패만 에러로 반환됩니다.
    pub async fn run(&self, catalog: &Catalog) -> Result<BatchReport> {
        let start = Instant::now();
        let mut report = BatchReport::new();

        let mut catalog = catalog.clone();
        if let Some(only) = &self.options.only {
            catalog.retain_only(only);
        }

        if !self.options.include_restricted {
            tracing::info!("INCLUDE_RESTRICTED_DATA=false: 제한 데이터셋 제외");
        }

        self.writer.prepare(self.options.clean_output).await?;

        tracing::info!(
            provider = self.provider.name(),
            datasets = catalog.len(),
            "데이터 준비 시작"
        );

        let mut summaries = Vec::new();
        for descriptor in catalog.datasets() {
            report.total += 1;

            if descriptor.restricted && !self.options.include_restricted {
                tracing::info!(dataset = %descriptor.id, "제한 데이터셋, 건너뜀");
                report.skipped += 1;
                continue;
            }

            let span = dataset_span!(descriptor.id, descriptor.kind);
            match self.process(descriptor).instrument(span).await {
                Ok(Step::Written { summary, records }) => {
                    report.written += 1;
                    report.total_records += records;
                    summaries.push(*summary);
                }
                Ok(Step::Empty) => {
                    report.empty += 1;
                }
                Err(e) => {
                    tracing::error!(dataset = %descriptor.id, error = %e, "데이터셋 처리 실패");
                    report.record_failure(&descriptor.id, e.to_string());
                }
            }
        }

        let path = self.writer.write_aggregate(&summaries).await?;
        tracing::info!(
            path = %path.display(),
            datasets = summaries.len(),
            "요약 목록 기록"
        );

        report.elapsed = start.elapsed();
        Ok(report)
    }

    async fn process(&self, descriptor: &DatasetDescriptor) -> Result<Step> {
        tracing::debug!("입력 조회");
        let outcome = self.provider.fetch(descriptor).await?;

        if outcome.is_empty() {
            return match outcome.reason {
                Some(reason) => {
                    tracing::warn!(reason = %reason, "입력 없음 (수집 실패 보고됨)");
                    Err(PrepareError::EmptyInput(reason))
                }
                None => {
                    tracing::warn!("입력 없음, 건너뜀");
                    Ok(Step::Empty)
                }
            };
        }

        let fetched = outcome.table.len();
        let mut ctx =
            SummaryContext::new(descriptor).with_source(outcome.location, outcome.format);
        if let Some(at) = outcome.fetched_at {
            ctx = ctx.with_fetched_at(at);
        }

        let dataset = dex_summary::summarize(&ctx, outcome.table)?;
        let path = self.writer.write_dataset(&dataset).await?;

        tracing::info!(
            fetched,
            records = dataset.meta.record_count,
            rows = dataset.sample_len(),
            path = %path.display(),
            "데이터셋 기록"
        );

        Ok(Step::Written {
            records: dataset.meta.record_count,
            summary: Box::new(dataset.summary()),
        })
    }
}
