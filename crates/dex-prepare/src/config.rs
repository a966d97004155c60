//! 설정 모듈.
//!
//! 우선순위: 기본값 → `dex.toml` (선택) → `DEX_*` 환경변수 → CLI 옵션.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Result;

/// 기본 설정 파일 이름
pub const DEFAULT_CONFIG_FILE: &str = "dex.toml";

/// 배치 실행 설정
#[derive(Debug, Clone, Deserialize)]
pub struct PrepareConfig {
    /// 수집기 저장소 디렉토리 (`index.json` 위치)
    pub data_dir: PathBuf,
    /// 데이터셋별 JSON 출력 디렉토리
    pub public_dir: PathBuf,
    /// `datasets.json` 출력 디렉토리
    pub site_dir: PathBuf,
    /// 카탈로그 파일 (없으면 기본 카탈로그)
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// 제한 데이터셋(Yahoo Finance) 포함 여부
    pub include_restricted: bool,
    /// 실행 전 출력 디렉토리 비우기
    pub clean_output: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            public_dir: PathBuf::from("public/data"),
            site_dir: PathBuf::from("src/data"),
            catalog: None,
            include_restricted: true,
            clean_output: true,
        }
    }
}

impl PrepareConfig {
    /// 기본 경로(`dex.toml`)와 환경변수에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// 설정 파일과 환경변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경변수만 사용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("data_dir", path_str(&defaults.data_dir))?
            .set_default("public_dir", path_str(&defaults.public_dir))?
            .set_default("site_dir", path_str(&defaults.site_dir))?
            .set_default("include_restricted", defaults.include_restricted)?
            .set_default("clean_output", defaults.clean_output)?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("DEX").try_parsing(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        // 기존 배포 스크립트 호환
        if let Some(include) = env_var_bool("INCLUDE_RESTRICTED_DATA") {
            config.include_restricted = include;
        }

        Ok(config)
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// 환경변수에서 bool 값 파싱 (`true`/`1`/`yes`)
fn env_var_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|v| parse_bool(&v))
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("YES"));
        assert!(parse_bool(" 1 "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_defaults() {
        let config = PrepareConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.public_dir, PathBuf::from("public/data"));
        assert_eq!(config.site_dir, PathBuf::from("src/data"));
        assert!(config.include_restricted);
        assert!(config.clean_output);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "data_dir = \"/srv/collector\"\nclean_output = false\ncatalog = \"custom.toml\""
        )
        .unwrap();

        let config = PrepareConfig::load(file.path()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/collector"));
        assert_eq!(config.public_dir, PathBuf::from("public/data"));
        assert!(!config.clean_output);
        assert_eq!(config.catalog, Some(PathBuf::from("custom.toml")));
    }
}
