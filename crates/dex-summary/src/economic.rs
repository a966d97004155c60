//! 경제 지표(FRED/BLS) 정책.
//!
//! 시리즈별 값 통계와 최신값을 계산합니다. 제목/단위/주기는 그룹 안에서
//! 동일하다고 가정하고 입력 순서상 첫 행의 값을 사용합니다.

use chrono::{DateTime, Utc};
use dex_core::serde_helpers::{opt_f64_lenient, opt_string_like, string_like};
use dex_core::time::{parse_timestamp, to_day, to_iso};
use dex_core::{round4, Table, ValueStats};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::model::{
    DatasetStats, DateRange, GroupKeys, SampleData, SeriesRow, SeriesStats, StatsDetail,
};
use crate::{parse_records, require_columns, Dataset, Result, SummaryContext, SummaryError};

const REQUIRED: &[&str] = &["series_id", "date"];

#[derive(Debug, Deserialize)]
struct SeriesRecord {
    #[serde(deserialize_with = "string_like")]
    series_id: String,
    date: Value,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    value: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_like")]
    title: Option<String>,
    #[serde(default, deserialize_with = "opt_string_like")]
    units: Option<String>,
    #[serde(default, deserialize_with = "opt_string_like")]
    frequency: Option<String>,
}

struct Observation {
    at: DateTime<Utc>,
    record: SeriesRecord,
}

/// 경제 지표 데이터셋을 요약합니다.
pub fn summarize(ctx: &SummaryContext<'_>, table: Table) -> Result<Dataset> {
    let columns = table.columns().to_vec();

    if table.is_empty() {
        return Ok(empty(ctx, &columns));
    }
    require_columns(&table, REQUIRED)?;

    let records: Vec<SeriesRecord> = parse_records(table)?;
    let mut observations = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        let at = parse_timestamp(&record.date).ok_or_else(|| SummaryError::InvalidTimestamp {
            column: "date",
            row: idx + 1,
            value: record.date.to_string(),
        })?;
        observations.push(Observation { at, record });
    }

    let record_count = observations.len();

    let mut groups: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for obs in &observations {
        groups
            .entry(obs.record.series_id.as_str())
            .or_default()
            .push(obs);
    }

    let by_series: BTreeMap<String, SeriesStats> = groups
        .iter()
        .filter_map(|(id, group)| series_stats(id, group).map(|s| (id.to_string(), s)))
        .collect();
    let series: Vec<String> = groups.keys().map(|s| s.to_string()).collect();

    let date_range = DateRange::from_times(observations.iter().map(|o| &o.at));

    observations.sort_by(|a, b| {
        a.record
            .series_id
            .cmp(&b.record.series_id)
            .then_with(|| a.at.cmp(&b.at))
    });
    let rows: Vec<SeriesRow> = observations
        .into_iter()
        .map(|obs| SeriesRow {
            date: to_day(&obs.at),
            series_id: obs.record.series_id,
            value: obs.record.value,
            title: obs.record.title,
            units: obs.record.units,
        })
        .collect();

    tracing::debug!(
        dataset = %ctx.descriptor.id,
        series = series.len(),
        records = record_count,
        "경제 지표 통계 계산 완료"
    );

    let meta = ctx.meta(record_count, &columns, GroupKeys::Series { series });
    let stats = DatasetStats {
        date_range,
        detail: StatsDetail::Economic { by_series },
    };
    Ok(ctx.dataset(meta, stats, SampleData::Series(rows)))
}

fn series_stats(series_id: &str, group: &[&Observation]) -> Option<SeriesStats> {
    let first = group.first()?;

    let values: Vec<f64> = group.iter().filter_map(|o| o.record.value).collect();
    let value = ValueStats::from_values(&values).map(|s| s.rounded());

    // 같은 날짜면 입력 순서상 뒤쪽 행
    let latest = group
        .iter()
        .copied()
        .reduce(|best, o| if o.at >= best.at { o } else { best })?;

    let date_min = group.iter().map(|o| o.at).min()?;

    Some(SeriesStats {
        title: first
            .record
            .title
            .clone()
            .unwrap_or_else(|| series_id.to_string()),
        units: first.record.units.clone().unwrap_or_default(),
        frequency: first.record.frequency.clone().unwrap_or_default(),
        count: group.len(),
        date_min: to_iso(&date_min),
        date_max: to_iso(&latest.at),
        value_mean: value.map(|s| s.mean),
        value_min: value.map(|s| s.min),
        value_max: value.map(|s| s.max),
        value_latest: latest.record.value.map(round4),
    })
}

fn empty(ctx: &SummaryContext<'_>, columns: &[String]) -> Dataset {
    let meta = ctx.meta(0, columns, GroupKeys::Series { series: vec![] });
    let stats = DatasetStats {
        date_range: DateRange::default(),
        detail: StatsDetail::Economic {
            by_series: BTreeMap::new(),
        },
    };
    ctx.dataset(meta, stats, SampleData::Series(vec![]))
}
