//! 데이터셋 디스크립터와 유형 태그 정의.
//!
//! 유형 태그는 출력 JSON의 `type` 필드로 그대로 직렬화되며,
//! 집계 정책(`Policy`)은 태그로부터 결정됩니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 데이터셋 유형 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    /// 가격 시계열 (OHLCV)
    Ohlcv,
    /// FRED 경제 지표
    Fred,
    /// BLS 경제 지표
    Bls,
    /// RSS 뉴스 피드
    Rss,
}

/// 집계 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// 심볼별 가격 통계
    Price,
    /// 시리즈별 경제 지표 통계
    EconomicSeries,
    /// 피드별 뉴스 통계
    News,
}

impl DatasetType {
    /// 이 유형에 적용할 집계 정책을 반환합니다.
    pub fn policy(&self) -> Policy {
        match self {
            DatasetType::Ohlcv => Policy::Price,
            DatasetType::Fred | DatasetType::Bls => Policy::EconomicSeries,
            DatasetType::Rss => Policy::News,
        }
    }

    /// 출력 JSON에 쓰이는 태그 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetType::Ohlcv => "ohlcv",
            DatasetType::Fred => "fred",
            DatasetType::Bls => "bls",
            DatasetType::Rss => "rss",
        }
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatasetType {
    type Err = CoreError;

    /// 수집기 쪽 소스 이름(`yfinance`, `news` 등)도 함께 받아들입니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ohlcv" | "price" | "yfinance" => Ok(DatasetType::Ohlcv),
            "fred" => Ok(DatasetType::Fred),
            "bls" => Ok(DatasetType::Bls),
            "rss" | "news" => Ok(DatasetType::Rss),
            _ => Err(CoreError::UnknownDatasetType(s.to_string())),
        }
    }
}

/// 데이터셋 하나의 선언적 설정.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetDescriptor {
    /// 데이터셋 ID (출력 파일명으로도 사용)
    pub id: String,
    /// 유형 태그
    pub kind: DatasetType,
    /// 사람이 읽는 설명
    pub description: String,
    /// 기본 키 컬럼
    pub primary_keys: Vec<String>,
    /// 이용 제한 데이터 여부 (공개 빌드에서 제외 가능)
    pub restricted: bool,
    /// 수집기에 전달되는 유형별 파라미터 (심볼, 시리즈, 피드 목록 등)
    pub params: serde_json::Value,
}

impl DatasetDescriptor {
    /// 새 디스크립터를 생성합니다.
    pub fn new(id: impl Into<String>, kind: DatasetType) -> Self {
        Self {
            id: id.into(),
            kind,
            description: String::new(),
            primary_keys: Vec::new(),
            restricted: false,
            params: serde_json::Value::Null,
        }
    }

    /// 설명을 설정합니다.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 기본 키 컬럼을 설정합니다.
    pub fn with_primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// 이용 제한 여부를 설정합니다.
    pub fn with_restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    /// 이 데이터셋의 집계 정책.
    pub fn policy(&self) -> Policy {
        self.kind.policy()
    }
}
