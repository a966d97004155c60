//! 데이터셋 요약기.
//!
//! 수집기가 넘겨준 표를 데이터셋 유형별 정책으로 집계하여
//! 정적 사이트가 읽는 JSON 문서 모델(`Dataset`)로 변환합니다.
//!
//! - **가격** (`ohlcv`): 심볼별 종가 통계와 거래량 합계
//! - **경제 지표** (`fred`, `bls`): 시리즈별 값 통계와 최신값
//! - **뉴스** (`rss`): 피드별/일자별 기사 수와 최근 기사 30건
//!
//! 모든 실수 통계는 소수점 4자리로 반올림됩니다.

pub mod context;
pub mod economic;
pub mod error;
pub mod model;
pub mod news;
pub mod price;

pub use context::SummaryContext;
pub use error::{Result, SummaryError};
pub use model::{
    Dataset, DatasetMeta, DatasetStats, DatasetSummary, DateRange, GroupKeys, PriceRow,
    SampleData, SeriesRow, SeriesStats, StatsDetail, SymbolStats,
};

use dex_core::{Policy, Table};

/// 표 하나를 데이터셋 문서로 요약합니다.
///
/// `_`로 시작하는 내부 컬럼은 집계 전에 제거됩니다.
pub fn summarize(ctx: &SummaryContext<'_>, table: Table) -> Result<Dataset> {
    let table = table.without_internal_columns();

    match ctx.descriptor.policy() {
        Policy::Price => price::summarize(ctx, table),
        Policy::EconomicSeries => economic::summarize(ctx, table),
        Policy::News => news::summarize(ctx, table),
    }
}

/// 행 목록을 레코드 타입으로 역직렬화합니다. 행 번호는 1부터 셉니다.
pub(crate) fn parse_records<T>(table: Table) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    table
        .into_rows()
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            serde_json::from_value(serde_json::Value::Object(row)).map_err(|source| {
                SummaryError::InvalidRecord {
                    row: idx + 1,
                    source,
                }
            })
        })
        .collect()
}

/// 필수 컬럼 확인.
pub(crate) fn require_columns(table: &Table, required: &[&str]) -> Result<()> {
    match table.missing_column(required) {
        Some(column) => Err(SummaryError::MissingColumn(column.to_string())),
        None => Ok(()),
    }
}
