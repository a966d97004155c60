//! 요약기에 입력 표를 공급하는 데이터 Provider.
//!
//! 이 crate는 다음을 제공합니다:
//! - `DataProvider` trait (러너에 주입되는 입력 경계)
//! - 외부 수집기 저장소(`index.json` + 레코드 파일)를 읽는 `StorageProvider`
//! - 미리 만든 표를 돌려주는 `MemoryProvider`

pub mod error;
pub mod memory;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};
pub use memory::MemoryProvider;
pub use provider::{DataProvider, FetchOutcome};
pub use storage::{RecordFormat, StorageIndex, StorageProvider};
