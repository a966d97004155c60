//! 배치 실행 통계 구조체.

use std::time::Duration;

/// 실패한 데이터셋과 사유
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFailure {
    pub name: String,
    pub message: String,
}

impl std::fmt::Display for DatasetFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

/// 배치 실행 통계
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// 카탈로그에서 처리 대상이 된 데이터셋 수
    pub total: usize,
    /// 파일로 기록된 데이터셋 수
    pub written: usize,
    /// 빈 입력 (사유 없음, 경고만)
    pub empty: usize,
    /// 건너뛴 데이터셋 수 (제한 데이터)
    pub skipped: usize,
    /// 실패 목록
    pub errors: Vec<DatasetFailure>,
    /// 집계된 총 레코드 수
    pub total_records: usize,
    /// 소요 시간
    pub elapsed: Duration,
}

impl BatchReport {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 실패 기록
    pub fn record_failure(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.errors.push(DatasetFailure {
            name: name.into(),
            message: message.into(),
        });
    }

    /// 실패가 없으면 true
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// 프로세스 종료 코드. 실패가 하나라도 있으면 1.
    pub fn exit_status(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// `"<name>: <message>"` 형식의 실패 목록
    pub fn error_lines(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            written = self.written,
            empty = self.empty,
            skipped = self.skipped,
            errors = self.errors.len(),
            total_records = self.total_records,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "데이터 준비 완료"
        );

        for failure in &self.errors {
            tracing::error!(dataset = %failure.name, "{}", failure.message);
        }
    }
}
