//! 뉴스(RSS) 정책.
//!
//! `published`를 해석할 수 없는 기사는 집계 전체에서 제외합니다.
//! 샘플 데이터는 최근 기사 30건이며, 입력에 존재하는 기사 컬럼만 담습니다.

use chrono::{DateTime, Utc};
use dex_core::time::{parse_timestamp, to_day, to_minute};
use dex_core::{Row, Table};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{DatasetStats, DateRange, GroupKeys, SampleData, StatsDetail};
use crate::{require_columns, Dataset, Result, SummaryContext};

const REQUIRED: &[&str] = &["published"];

/// 샘플로 내보낼 최근 기사 수
pub const RECENT_ARTICLES: usize = 30;

/// 샘플 행에 담는 컬럼 (순서 유지)
const ARTICLE_COLUMNS: &[&str] = &["title", "link", "published", "feed_name", "author"];

struct Article {
    published: DateTime<Utc>,
    feed: Option<String>,
    row: Row,
}

/// 뉴스 데이터셋을 요약합니다.
pub fn summarize(ctx: &SummaryContext<'_>, table: Table) -> Result<Dataset> {
    let columns = table.columns().to_vec();

    if table.is_empty() {
        return Ok(empty(ctx, &columns));
    }
    require_columns(&table, REQUIRED)?;

    let sample_columns: Vec<&str> = ARTICLE_COLUMNS
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect();

    let total = table.len();
    let mut articles: Vec<Article> = table
        .into_rows()
        .into_iter()
        .filter_map(|row| {
            let published = row.get("published").and_then(parse_timestamp)?;
            let feed = row.get("feed_name").and_then(feed_name);
            Some(Article {
                published,
                feed,
                row,
            })
        })
        .collect();

    let dropped = total - articles.len();
    if dropped > 0 {
        tracing::debug!(
            dataset = %ctx.descriptor.id,
            dropped,
            "published 값을 해석할 수 없는 기사 제외"
        );
    }

    let mut articles_by_feed: BTreeMap<String, usize> = BTreeMap::new();
    let mut articles_by_day: BTreeMap<String, usize> = BTreeMap::new();
    for article in &articles {
        if let Some(feed) = &article.feed {
            *articles_by_feed.entry(feed.clone()).or_default() += 1;
        }
        *articles_by_day.entry(to_day(&article.published)).or_default() += 1;
    }
    let feeds: Vec<String> = articles
        .iter()
        .filter_map(|a| a.feed.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let date_range = DateRange::from_times(articles.iter().map(|a| &a.published));
    let record_count = articles.len();

    // 안정 정렬: 같은 시각이면 입력 순서 유지
    articles.sort_by(|a, b| b.published.cmp(&a.published));
    let recent: Vec<Row> = articles
        .into_iter()
        .take(RECENT_ARTICLES)
        .map(|article| sample_row(article, &sample_columns))
        .collect();

    let meta = ctx.meta(record_count, &columns, GroupKeys::Feeds { feeds });
    let stats = DatasetStats {
        date_range,
        detail: StatsDetail::News {
            articles_by_feed,
            articles_by_day,
        },
    };
    Ok(ctx.dataset(meta, stats, SampleData::Articles(recent)))
}

fn feed_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn sample_row(mut article: Article, columns: &[&str]) -> Row {
    let mut out = Row::new();
    for &column in columns {
        let value = if column == "published" {
            Value::String(to_minute(&article.published))
        } else {
            article.row.remove(column).unwrap_or(Value::Null)
        };
        out.insert(column.to_string(), value);
    }
    out
}

fn empty(ctx: &SummaryContext<'_>, columns: &[String]) -> Dataset {
    let meta = ctx.meta(0, columns, GroupKeys::Feeds { feeds: vec![] });
    let stats = DatasetStats {
        date_range: DateRange::default(),
        detail: StatsDetail::News {
            articles_by_feed: BTreeMap::new(),
            articles_by_day: BTreeMap::new(),
        },
    };
    ctx.dataset(meta, stats, SampleData::Articles(vec![]))
}
