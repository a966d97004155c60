//! 타임스탬프 파싱 및 포맷 헬퍼.
//!
//! 모든 시각은 UTC로 정규화합니다. 오프셋 없는 값은 UTC로 간주합니다.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// 오프셋이 포함된 형식
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// 오프셋 없는 날짜+시각 형식
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 날짜 전용 형식
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// 문자열 타임스탬프를 UTC로 파싱합니다.
pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
        }
    }

    None
}

/// JSON 값을 UTC 타임스탬프로 파싱합니다.
///
/// 숫자는 에포크 밀리초로 해석합니다. 수집기의 JSON 레코드 파일은 pandas
/// `to_json`으로 기록되며, 그 기본 `date_unit`이 밀리초입니다. 나노초 값을
/// 그대로 넣으면 표현 범위를 벗어나 `None`이 됩니다.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// ISO-8601 문자열 (`2024-01-02T00:00:00+00:00`).
pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// 달력 일자 문자열 (`2024-01-02`).
pub fn to_day(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// 분 단위 문자열 (`2024-01-02 15:04`).
pub fn to_minute(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// 두 시각 사이의 경과 일수 (소수점 이하 버림).
pub fn days_between(min: &DateTime<Utc>, max: &DateTime<Utc>) -> i64 {
    (*max - *min).num_days()
}
