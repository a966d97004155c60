//! 통계 집계 및 반올림 헬퍼.

/// 통계 값의 소수점 자릿수
pub const STAT_DECIMALS: i32 = 4;

/// 소수점 4자리로 반올림합니다 (0에서 먼 쪽으로).
///
/// 비유한 값은 그대로 반환합니다.
pub fn round4(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(STAT_DECIMALS);
    let rounded = (value * scale).round() / scale;
    // -0.0 방지
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// 값 목록의 기초 통계.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueStats {
    /// 값 개수
    pub count: usize,
    /// 평균
    pub mean: f64,
    /// 최솟값
    pub min: f64,
    /// 최댓값
    pub max: f64,
    /// 표본 표준편차 (n - 1). 값이 2개 미만이면 0.
    pub std: f64,
}

impl ValueStats {
    /// 값 목록으로부터 통계를 계산합니다. 빈 목록이면 `None`.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let std = if count < 2 {
            0.0
        } else {
            let sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sq / (count - 1) as f64).sqrt()
        };

        Some(Self {
            count,
            mean,
            min,
            max,
            std,
        })
    }

    /// 모든 필드를 소수점 4자리로 반올림한 복사본.
    pub fn rounded(&self) -> Self {
        Self {
            count: self.count,
            mean: round4(self.mean),
            min: round4(self.min),
            max: round4(self.max),
            std: round4(self.std),
        }
    }
}
