//! 가격(OHLCV) 정책.
//!
//! 심볼별로 종가 평균/최소/최대/표본 표준편차와 거래량 합계를 계산하고,
//! (종가가 비어 있는 행은 `count`에만 포함)
//! `(symbol, date)` 순으로 정렬한 전체 행을 차트용 데이터로 내보냅니다.

use chrono::{DateTime, Utc};
use dex_core::serde_helpers::{opt_f64_lenient, string_like};
use dex_core::time::{parse_timestamp, to_day, to_iso};
use dex_core::{Table, ValueStats};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::model::{
    DatasetStats, DateRange, GroupKeys, PriceRow, SampleData, StatsDetail, SymbolStats,
};
use crate::{parse_records, require_columns, Dataset, Result, SummaryContext, SummaryError};

const REQUIRED: &[&str] = &["symbol", "date", "close"];

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(deserialize_with = "string_like")]
    symbol: String,
    date: Value,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    open: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    high: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    low: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    close: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    volume: Option<f64>,
}

struct Observation {
    at: DateTime<Utc>,
    record: PriceRecord,
}

/// 가격 데이터셋을 요약합니다.
pub fn summarize(ctx: &SummaryContext<'_>, table: Table) -> Result<Dataset> {
    let columns = table.columns().to_vec();

    if table.is_empty() {
        return Ok(empty(ctx, &columns));
    }
    require_columns(&table, REQUIRED)?;

    let records: Vec<PriceRecord> = parse_records(table)?;
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
        groups.entry(obs.record.symbol.as_str()).or_default().push(obs);
    }

    let by_symbol: BTreeMap<String, SymbolStats> = groups
        .iter()
        .filter_map(|(symbol, group)| symbol_stats(group).map(|s| (symbol.to_string(), s)))
        .collect();
    let symbols: Vec<String> = groups.keys().map(|s| s.to_string()).collect();

    let date_range = DateRange::from_times(observations.iter().map(|o| &o.at));

    observations.sort_by(|a, b| {
        a.record
            .symbol
            .cmp(&b.record.symbol)
            .then_with(|| a.at.cmp(&b.at))
    });
    let rows: Vec<PriceRow> = observations
        .into_iter()
        .map(|obs| PriceRow {
            date: to_day(&obs.at),
            symbol: obs.record.symbol,
            open: obs.record.open,
            high: obs.record.high,
            low: obs.record.low,
            close: obs.record.close,
            volume: obs.record.volume,
        })
        .collect();

    tracing::debug!(
        dataset = %ctx.descriptor.id,
        symbols = symbols.len(),
        records = record_count,
        "가격 통계 계산 완료"
    );

    let meta = ctx.meta(record_count, &columns, GroupKeys::Symbols { symbols });
    let stats = DatasetStats {
        date_range,
        detail: StatsDetail::Price { by_symbol },
    };
    Ok(ctx.dataset(meta, stats, SampleData::Prices(rows)))
}

fn symbol_stats(group: &[&Observation]) -> Option<SymbolStats> {
    let closes: Vec<f64> = group.iter().filter_map(|o| o.record.close).collect();
    let close = ValueStats::from_values(&closes).map(|s| s.rounded());

    let date_min = group.iter().map(|o| o.at).min()?;
    let date_max = group.iter().map(|o| o.at).max()?;

    let volume_total: f64 = group.iter().filter_map(|o| o.record.volume).sum();

    Some(SymbolStats {
        count: group.len(),
        date_min: to_iso(&date_min),
        date_max: to_iso(&date_max),
        close_mean: close.map(|s| s.mean),
        close_min: close.map(|s| s.min),
        close_max: close.map(|s| s.max),
        close_std: close.map_or(0.0, |s| s.std),
        volume_total: volume_total as i64,
    })
}

fn empty(ctx: &SummaryContext<'_>, columns: &[String]) -> Dataset {
    let meta = ctx.meta(0, columns, GroupKeys::Symbols { symbols: vec![] });
    let stats = DatasetStats {
        date_range: DateRange::default(),
        detail: StatsDetail::Price {
            by_symbol: BTreeMap::new(),
        },
    };
    ctx.dataset(meta, stats, SampleData::Prices(vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_core::{DatasetDescriptor, DatasetType, Row};
    use serde_json::json;

    fn table(rows: Vec<Value>) -> Table {
        Table::from_rows(
            rows.into_iter()
                .map(|v| v.as_object().cloned().unwrap())
                .collect::<Vec<Row>>(),
        )
    }

    fn descriptor() -> DatasetDescriptor {
        DatasetDescriptor::new("us_indices", DatasetType::Ohlcv).with_description("US indices")
    }

    #[test]
    fn test_single_row_group() {
        let d = descriptor();
        let ctx = SummaryContext::new(&d);
        let input = table(vec![json!({
            "symbol": "AAPL", "date": "2024-01-02",
            "open": 184.0, "high": 186.0, "low": 183.5, "close": 185.0, "volume": 1000
        })]);

        let dataset = summarize(&ctx, input).unwrap();
        let StatsDetail::Price { by_symbol } = &dataset.stats.detail else {
            panic!("price stats expected");
        };
        let aapl = &by_symbol["AAPL"];

        assert_eq!(aapl.count, 1);
        assert_eq!(aapl.close_mean, Some(185.0));
        assert_eq!(aapl.close_std, 0.0);
        assert_eq!(aapl.volume_total, 1000);
        assert_eq!(dataset.stats.date_range.days, 0);
        assert_eq!(dataset.meta.groups.keys(), ["AAPL".to_string()]);
    }

    #[test]
    fn test_groups_sorted_and_sample_ordered() {
        let d = descriptor();
        let ctx = SummaryContext::new(&d);
        let input = table(vec![
            json!({"symbol": "SPY", "date": "2024-01-03", "close": 471.0, "volume": 10}),
            json!({"symbol": "QQQ", "date": "2024-01-02", "close": 400.0, "volume": 5}),
            json!({"symbol": "SPY", "date": "2024-01-02", "close": 470.0, "volume": 20}),
            json!({"symbol": "SPY", "date": "2024-01-12", "close": 475.0}),
        ]);

        let dataset = summarize(&ctx, input).unwrap();
        let StatsDetail::Price { by_symbol } = &dataset.stats.detail else {
            panic!("price stats expected");
        };

        assert_eq!(dataset.meta.groups.keys(), ["QQQ".to_string(), "SPY".to_string()]);
        let spy = &by_symbol["SPY"];
        assert_eq!(spy.count, 3);
        assert_eq!(spy.close_min, Some(470.0));
        assert_eq!(spy.close_max, Some(475.0));
        assert_eq!(spy.close_mean, Some(472.0));
        assert_eq!(spy.close_std, 2.6458);
        assert_eq!(spy.volume_total, 30);
        assert_eq!(spy.date_min, "2024-01-02T00:00:00+00:00");
        assert_eq!(dataset.stats.date_range.days, 10);

        let SampleData::Prices(rows) = &dataset.data else {
            panic!("price rows expected");
        };
        let order: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.symbol.as_str(), r.date.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("QQQ", "2024-01-02"),
                ("SPY", "2024-01-02"),
                ("SPY", "2024-01-03"),
                ("SPY", "2024-01-12"),
            ]
        );
    }

    #[test]
    fn test_csv_string_cells() {
        let d = descriptor();
        let ctx = SummaryContext::new(&d);
        let input = table(vec![json!({
            "symbol": "005930", "date": "2024-01-02", "close": "71000", "volume": "1500"
        })]);

        let dataset = summarize(&ctx, input).unwrap();
        let StatsDetail::Price { by_symbol } = &dataset.stats.detail else {
            panic!("price stats expected");
        };
        assert_eq!(by_symbol["005930"].close_mean, Some(71000.0));
        assert_eq!(by_symbol["005930"].volume_total, 1500);
    }

    #[test]
    fn test_null_close_counts_row_but_skips_stats() {
        let d = descriptor();
        let ctx = SummaryContext::new(&d);
        let input = table(vec![
            json!({"symbol": "SPY", "date": "2024-01-02", "close": 470.0, "volume": 20}),
            json!({"symbol": "SPY", "date": "2024-01-03", "close": null, "volume": 10}),
            json!({"symbol": "QQQ", "date": "2024-01-02", "close": ""}),
        ]);

        let dataset = summarize(&ctx, input).unwrap();
        let StatsDetail::Price { by_symbol } = &dataset.stats.detail else {
            panic!("price stats expected");
        };

        let spy = &by_symbol["SPY"];
        assert_eq!(spy.count, 2);
        assert_eq!(spy.close_mean, Some(470.0));
        assert_eq!(spy.close_min, Some(470.0));
        assert_eq!(spy.close_max, Some(470.0));
        assert_eq!(spy.close_std, 0.0);
        assert_eq!(spy.volume_total, 30);
        assert_eq!(spy.date_max, "2024-01-03T00:00:00+00:00");

        let qqq = &by_symbol["QQQ"];
        assert_eq!(qqq.count, 1);
        assert_eq!(qqq.close_mean, None);
        assert_eq!(qqq.close_std, 0.0);
        assert_eq!(dataset.meta.record_count, 3);

        let SampleData::Prices(rows) = &dataset.data else {
            panic!("price rows expected");
        };
        assert_eq!(rows[2].date, "2024-01-03");
        assert_eq!(rows[2].close, None);
    }

    #[test]
    fn test_non_finite_close_is_missing() {
        let d = descriptor();
        let ctx = SummaryContext::new(&d);
        let input = table(vec![
            json!({"symbol": "SPY", "date": "2024-01-02", "close": "inf"}),
            json!({"symbol": "SPY", "date": "2024-01-03", "close": "1"}),
        ]);

        let dataset = summarize(&ctx, input).unwrap();
        let StatsDetail::Price { by_symbol } = &dataset.stats.detail else {
            panic!("price stats expected");
        };

        let spy = &by_symbol["SPY"];
        assert_eq!(spy.count, 2);
        assert_eq!(spy.close_mean, Some(1.0));
        assert_eq!(spy.close_max, Some(1.0));
        assert_eq!(spy.close_std, 0.0);

        let value = serde_json::to_value(spy).unwrap();
        assert_eq!(value["close_mean"], json!(1.0));
        assert_eq!(value["close_std"], json!(0.0));
    }

    #[test]
    fn test_missing_close_column_is_error() {
        let d = descriptor();
        let ctx = SummaryContext::new(&d);
        let input = table(vec![json!({"symbol": "SPY", "date": "2024-01-02"})]);

        let err = summarize(&ctx, input).unwrap_err();
        assert!(matches!(err, SummaryError::MissingColumn(ref c) if c == "close"));
    }

    #[test]
    fn test_bad_date_is_error() {
        let d = descriptor();
        let ctx = SummaryContext::new(&d);
        let input = table(vec![json!({"symbol": "SPY", "date": "yesterday", "close": 1.0})]);

        let err = summarize(&ctx, input).unwrap_err();
        assert!(matches!(err, SummaryError::InvalidTimestamp { row: 1, .. }));
    }

    #[test]
    fn test_empty_table() {
        let d = descriptor();
        let ctx = SummaryContext::new(&d);
        let dataset = summarize(&ctx, Table::empty()).unwrap();

        assert_eq!(dataset.meta.record_count, 0);
        assert!(dataset.data.is_empty());
        assert_eq!(dataset.stats.date_range, DateRange::default());
        assert_eq!(dataset.stats.detail.grouped_count(), 0);
    }
}
