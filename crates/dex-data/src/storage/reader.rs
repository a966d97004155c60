//! 레코드 파일 리더.

use dex_core::{Row, Table};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{DataError, Result};

/// 레코드 파일 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// 헤더가 있는 CSV
    Csv,
    /// 객체 배열 JSON
    Json,
    /// 줄 단위 JSON 객체
    JsonLines,
}

impl RecordFormat {
    /// 파일 확장자로 형식을 추론합니다.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| DataError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Csv => "csv",
            RecordFormat::Json => "json",
            RecordFormat::JsonLines => "jsonl",
        }
    }

    /// 바이트 내용을 표로 읽습니다.
    pub fn read(&self, bytes: &[u8]) -> Result<Table> {
        match self {
            RecordFormat::Csv => read_csv(bytes),
            RecordFormat::Json => read_json(bytes),
            RecordFormat::JsonLines => read_json_lines(bytes),
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordFormat {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(RecordFormat::Csv),
            "json" => Ok(RecordFormat::Json),
            "jsonl" | "ndjson" => Ok(RecordFormat::JsonLines),
            other => Err(DataError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// CSV를 읽습니다. 셀은 문자열로 두고, 빈 셀은 null로 바꿉니다.
fn read_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (column.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

/// 객체 배열 JSON을 읽습니다.
///
/// `{"records": [...]}` 형태의 래퍼도 허용합니다.
fn read_json(bytes: &[u8]) -> Result<Table> {
    let value: Value = serde_json::from_slice(bytes)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("records") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DataError::InvalidData(
                    "JSON 레코드 파일은 객체 배열이어야 합니다".to_string(),
                ))
            }
        },
        _ => {
            return Err(DataError::InvalidData(
                "JSON 레코드 파일은 객체 배열이어야 합니다".to_string(),
            ))
        }
    };

    let rows = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| into_row(item, idx + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(Table::from_rows(rows))
}

/// 줄 단위 JSON을 읽습니다. 빈 줄은 건너뜁니다.
fn read_json_lines(bytes: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DataError::InvalidData(format!("UTF-8이 아닌 JSONL: {}", e)))?;

    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)?;
        rows.push(into_row(value, idx + 1)?);
    }

    Ok(Table::from_rows(rows))
}

fn into_row(value: Value, position: usize) -> Result<Row> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DataError::InvalidData(format!(
            "{}번째 레코드가 객체가 아닙니다: {}",
            position, other
        ))),
    }
}
