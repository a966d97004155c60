//! Data preparation CLI.

use anyhow::Context;
use clap::Parser;
use dex_core::{init_logging, LogConfig, LogFormat};
use dex_data::StorageProvider;
use dex_prepare::{Catalog, OutputWriter, PrepareConfig, Preparer, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dex-prepare")]
#[command(about = "Prepare collected datasets as JSON for the static site", long_about = None)]
#[command(version)]
struct Cli {
    /// 카탈로그 TOML 파일 (기본: 내장 카탈로그)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// 수집기 저장소 디렉토리
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 데이터셋별 JSON 출력 디렉토리
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// datasets.json 출력 디렉토리
    #[arg(long)]
    site_dir: Option<PathBuf>,

    /// 특정 데이터셋만 처리 (쉼표로 구분, 예: "fred_gdp,fed_news")
    #[arg(long, value_delimiter = ',')]
    only: Option<Vec<String>>,

    /// 출력 디렉토리를 비우지 않음
    #[arg(long)]
    no_clean: bool,

    /// 제한 데이터셋(Yahoo Finance) 제외
    #[arg(long)]
    exclude_restricted: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,
}

impl Cli {
    fn apply(&self, config: &mut PrepareConfig) {
        if let Some(path) = &self.catalog {
            config.catalog = Some(path.clone());
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.public_dir {
            config.public_dir = dir.clone();
        }
        if let Some(dir) = &self.site_dir {
            config.site_dir = dir.clone();
        }
        if self.no_clean {
            config.clean_output = false;
        }
        if self.exclude_restricted {
            config.include_restricted = false;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::new(&cli.log_level).with_format(cli.log_format);
    if let Err(e) = init_logging(log_config) {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    match run(cli).await {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    tracing::info!("Derple Dex 데이터 준비 시작");

    let mut config = PrepareConfig::load_default().context("설정 로드 실패")?;
    cli.apply(&mut config);
    tracing::debug!(?config, "설정 로드 완료");

    let catalog = Catalog::load_or_builtin(config.catalog.as_deref())
        .await
        .context("카탈로그 로드 실패")?;

    let provider = StorageProvider::open(&config.data_dir)
        .await
        .with_context(|| format!("수집기 저장소를 열 수 없음: {}", config.data_dir.display()))?;

    let writer = OutputWriter::new(&config.public_dir, &config.site_dir);
    let preparer = Preparer::new(provider, writer).with_options(RunOptions {
        include_restricted: config.include_restricted,
        clean_output: config.clean_output,
        only: cli.only,
    });

    let report = preparer.run(&catalog).await?;
    report.log_summary();

    if !report.is_success() {
        eprintln!("Errors encountered:");
        for line in report.error_lines() {
            eprintln!("  - {}", line);
        }
    }

    Ok(report.exit_status())
}
