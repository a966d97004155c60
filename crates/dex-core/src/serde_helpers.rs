//! 느슨한 역직렬화/직렬화 헬퍼.
//!
//! CSV에서 읽은 셀은 모두 문자열로 들어오고, JSON 파일은 숫자로 들어오므로
//! 레코드 필드는 두 표현을 모두 받아들여야 합니다.

use serde::{de, Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// 문자열 또는 숫자를 문자열로 읽습니다.
pub fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "문자열 또는 숫자가 필요합니다: {}",
            other
        ))),
    }
}

/// 선택적 문자열. null/빈 문자열은 `None`.
pub fn opt_string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "문자열 또는 숫자가 필요합니다: {}",
            other
        ))),
    }
}

/// 숫자 또는 숫자 문자열을 읽습니다.
///
/// null, 빈 문자열, `.`, 그리고 유한하지 않은 값(`nan`, `inf`)은 `None`.
pub fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            // FRED는 결측값을 "."으로 표기
            if trimmed.is_empty() || trimmed == "." {
                return Ok(None);
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                Ok(_) => Ok(None),
                Err(_) => Err(de::Error::custom(format!("숫자가 아닙니다: {}", s))),
            }
        }
        Some(other) => Err(de::Error::custom(format!("숫자가 필요합니다: {}", other))),
    }
}

/// 정수로 표현 가능한 값은 정수로, 아니면 실수로 씁니다.
pub fn compact_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// `compact_number`의 Option 버전.
pub fn opt_compact_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => compact_number(v, serializer),
        None => serializer.serialize_none(),
    }
}
