//! 수집기가 넘겨주는 표 형태 입력.
//!
//! 행은 컬럼명 → JSON 값 맵이며, 컬럼 목록은 처음 등장한 순서를 유지합니다.
//! `_`로 시작하는 컬럼은 수집기 내부용이므로 집계 전에 제거합니다.

use serde_json::{Map, Value};

/// 한 행 (컬럼명 → 값).
pub type Row = Map<String, Value>;

/// 컬럼 목록과 행으로 구성된 표.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// 명시적인 컬럼 목록으로 표를 생성합니다.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// 빈 표.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 행 목록에서 컬럼 목록을 추론하여 표를 생성합니다.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    /// 컬럼 목록.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 행 목록.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// 행 소유권을 넘깁니다.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// 행 수.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 행이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 컬럼 존재 여부.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// 첫 번째로 없는 필수 컬럼을 반환합니다.
    pub fn missing_column<'a>(&self, required: &[&'a str]) -> Option<&'a str> {
        required.iter().copied().find(|c| !self.has_column(c))
    }

    /// `_`로 시작하는 내부 컬럼을 제거한 표를 반환합니다.
    pub fn without_internal_columns(self) -> Self {
        let is_internal = |name: &str| name.starts_with('_');
        if !self.columns.iter().any(|c| is_internal(c)) {
            return self;
        }

        let columns = self
            .columns
            .into_iter()
            .filter(|c| !is_internal(c))
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().filter(|(k, _)| !is_internal(k)).collect())
            .collect();

        Self { columns, rows }
    }
}
