//! 출력 JSON 문서 모델.
//!
//! 데이터셋 파일(`<name>.json`)은 `Dataset` 전체를, 집계 파일
//! (`datasets.json`)은 `DatasetSummary` 목록을 직렬화합니다.

use chrono::{DateTime, Utc};
use dex_core::serde_helpers::opt_compact_number;
use dex_core::time::{days_between, to_iso};
use dex_core::{DatasetType, Row};
use serde::Serialize;
use std::collections::BTreeMap;

/// 데이터셋 문서 (샘플 데이터 포함).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// 데이터셋 이름
    pub name: String,
    /// 유형 태그
    #[serde(rename = "type")]
    pub kind: DatasetType,
    /// 설명
    pub description: String,
    /// 메타데이터
    pub meta: DatasetMeta,
    /// 통계
    pub stats: DatasetStats,
    /// 차트용 행 데이터
    pub data: SampleData,
}

impl Dataset {
    /// 샘플 데이터를 제외한 요약본을 만듭니다.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            name: self.name.clone(),
            kind: self.kind,
            description: self.description.clone(),
            meta: self.meta.clone(),
            stats: self.stats.clone(),
        }
    }

    /// 샘플 데이터 행 수.
    pub fn sample_len(&self) -> usize {
        self.data.len()
    }
}

/// 랜딩 페이지용 요약 (샘플 데이터 제외).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DatasetType,
    pub description: String,
    pub meta: DatasetMeta,
    pub stats: DatasetStats,
}

/// 데이터셋 메타데이터 블록.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetMeta {
    pub name: String,
    pub source_id: String,
    /// 입력 위치
    pub location: String,
    /// 입력 형식
    pub format: String,
    /// 집계에 사용된 레코드 수
    pub record_count: usize,
    /// 내부 컬럼을 제외한 입력 컬럼
    pub columns: Vec<String>,
    pub primary_keys: Vec<String>,
    /// 수집 시각 (ISO-8601)
    pub fetched_at: String,
    pub description: String,
    /// 그룹 키 목록 (`symbols` / `series` / `feeds`)
    #[serde(flatten)]
    pub groups: GroupKeys,
}

/// 정책별 그룹 키 목록.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupKeys {
    Symbols { symbols: Vec<String> },
    Series { series: Vec<String> },
    Feeds { feeds: Vec<String> },
}

impl GroupKeys {
    /// 그룹 키 목록.
    pub fn keys(&self) -> &[String] {
        match self {
            GroupKeys::Symbols { symbols } => symbols,
            GroupKeys::Series { series } => series,
            GroupKeys::Feeds { feeds } => feeds,
        }
    }
}

/// 전체 기간.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    pub min: Option<String>,
    pub max: Option<String>,
    /// 경과 일수 (데이터가 없으면 0)
    pub days: i64,
}

impl DateRange {
    /// 시각 목록에서 기간을 계산합니다.
    pub fn from_times<'a, I>(times: I) -> Self
    where
        I: IntoIterator<Item = &'a DateTime<Utc>>,
    {
        let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        for t in times {
            bounds = Some(match bounds {
                None => (*t, *t),
                Some((lo, hi)) => (lo.min(*t), hi.max(*t)),
            });
        }

        match bounds {
            Some((lo, hi)) => Self {
                min: Some(to_iso(&lo)),
                max: Some(to_iso(&hi)),
                days: days_between(&lo, &hi),
            },
            None => Self::default(),
        }
    }
}

/// 통계 블록.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub date_range: DateRange,
    #[serde(flatten)]
    pub detail: StatsDetail,
}

/// 정책별 통계.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatsDetail {
    Price {
        by_symbol: BTreeMap<String, SymbolStats>,
    },
    Economic {
        by_series: BTreeMap<String, SeriesStats>,
    },
    News {
        articles_by_feed: BTreeMap<String, usize>,
        articles_by_day: BTreeMap<String, usize>,
    },
}

impl StatsDetail {
    /// 그룹별 레코드 수 합계.
    pub fn grouped_count(&self) -> usize {
        match self {
            StatsDetail::Price { by_symbol } => by_symbol.values().map(|s| s.count).sum(),
            StatsDetail::Economic { by_series } => by_series.values().map(|s| s.count).sum(),
            StatsDetail::News {
                articles_by_feed, ..
            } => articles_by_feed.values().sum(),
        }
    }
}

/// 심볼별 가격 통계.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolStats {
    pub count: usize,
    pub date_min: String,
    pub date_max: String,
    /// 종가가 하나도 없으면 null
    pub close_mean: Option<f64>,
    pub close_min: Option<f64>,
    pub close_max: Option<f64>,
    /// 표본 표준편차. 종가가 2건 미만이면 0.
    pub close_std: f64,
    pub volume_total: i64,
}

/// 시리즈별 경제 지표 통계.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStats {
    pub title: String,
    pub units: String,
    pub frequency: String,
    pub count: usize,
    pub date_min: String,
    pub date_max: String,
    pub value_mean: Option<f64>,
    pub value_min: Option<f64>,
    pub value_max: Option<f64>,
    /// 가장 최근 날짜의 값
    pub value_latest: Option<f64>,
}

/// 차트용 행 데이터.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SampleData {
    Prices(Vec<PriceRow>),
    Series(Vec<SeriesRow>),
    /// 사용 가능한 컬럼만 담은 최근 기사
    Articles(Vec<Row>),
}

impl SampleData {
    pub fn len(&self) -> usize {
        match self {
            SampleData::Prices(rows) => rows.len(),
            SampleData::Series(rows) => rows.len(),
            SampleData::Articles(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 가격 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub symbol: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    #[serde(serialize_with = "opt_compact_number")]
    pub volume: Option<f64>,
}

/// 경제 지표 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub series_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub value: Option<f64>,
    pub title: Option<String>,
    pub units: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_core::time::parse_timestamp_str;
    use serde_json::json;

    #[test]
    fn test_date_range_from_times() {
        let times = vec![
            parse_timestamp_str("2024-01-05").unwrap(),
            parse_timestamp_str("2024-01-02").unwrap(),
            parse_timestamp_str("2024-01-09").unwrap(),
        ];
        let range = DateRange::from_times(&times);

        assert_eq!(range.min.as_deref(), Some("2024-01-02T00:00:00+00:00"));
        assert_eq!(range.max.as_deref(), Some("2024-01-09T00:00:00+00:00"));
        assert_eq!(range.days, 7);
    }

    #[test]
    fn test_empty_date_range_serializes_nulls() {
        let range = DateRange::from_times(&Vec::<DateTime<Utc>>::new());
        assert_eq!(
            serde_json::to_value(&range).unwrap(),
            json!({"min": null, "max": null, "days": 0})
        );
    }

    #[test]
    fn test_flattened_meta_and_stats() {
        let meta = DatasetMeta {
            name: "fed_news".into(),
            source_id: "fed_news".into(),
            location: "memory".into(),
            format: "table".into(),
            record_count: 0,
            columns: vec![],
            primary_keys: vec![],
            fetched_at: "2024-01-01T00:00:00+00:00".into(),
            description: String::new(),
            groups: GroupKeys::Feeds { feeds: vec!["fed".into()] },
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["feeds"], json!(["fed"]));
        assert!(value.get("groups").is_none());

        let stats = DatasetStats {
            date_range: DateRange::default(),
            detail: StatsDetail::News {
                articles_by_feed: BTreeMap::from([("fed".to_string(), 2)]),
                articles_by_day: BTreeMap::new(),
            },
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["articles_by_feed"]["fed"], json!(2));
        assert_eq!(value["date_range"]["days"], json!(0));
        assert_eq!(stats.detail.grouped_count(), 2);
    }

    #[test]
    fn test_price_row_compact_volume() {
        let row = PriceRow {
            symbol: "SPY".into(),
            date: "2024-01-02".into(),
            open: None,
            high: None,
            low: None,
            close: Some(470.5),
            volume: Some(1200.0),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["volume"], json!(1200));
        assert_eq!(value["close"], json!(470.5));
        assert_eq!(value["open"], serde_json::Value::Null);
    }
}
