//! 배치 실행 통합 테스트.

use dex_core::{Row, Table};
use dex_data::{MemoryProvider, StorageProvider};
use dex_prepare::{Catalog, OutputWriter, Preparer, RunOptions};
use serde_json::{json, Value};
use std::path::Path;

fn table(rows: Vec<Value>) -> Table {
    Table::from_rows(
        rows.into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect::<Vec<Row>>(),
    )
}

fn catalog() -> Catalog {
    Catalog::from_toml_str(
        r#"
        [[dataset]]
        id = "us_indices"
        type = "ohlcv"
        description = "US indices"
        primary_keys = ["symbol", "date"]

        [[dataset]]
        id = "fred_gdp"
        type = "fred"
        description = "US GDP"
        "#,
    )
    .unwrap()
}

fn writer(root: &Path) -> OutputWriter {
    OutputWriter::new(root.join("public/data"), root.join("src/data"))
}

fn read_json(path: impl AsRef<Path>) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn one_failing_dataset_does_not_stop_the_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let provider = MemoryProvider::new()
        .with_table(
            "us_indices",
            table(vec![json!({
                "symbol": "AAPL", "date": "2024-01-02", "close": 185.0, "volume": 1000
            })]),
        )
        // date 컬럼 없음
        .with_table("fred_gdp", table(vec![json!({"series_id": "GDP", "value": 1.0})]));

    let report = Preparer::new(provider, writer(tmp.path()))
        .run(&catalog())
        .await
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.exit_status(), 1);
    assert_eq!(report.written, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].name, "fred_gdp");
    assert!(report.error_lines()[0].starts_with("fred_gdp: "));
    assert!(report.error_lines()[0].contains("date"));

    let dataset = read_json(tmp.path().join("public/data/us_indices.json"));
    assert_eq!(dataset["stats"]["by_symbol"]["AAPL"]["count"], json!(1));
    assert_eq!(dataset["stats"]["by_symbol"]["AAPL"]["close_std"], json!(0.0));
    assert!(!tmp.path().join("public/data/fred_gdp.json").exists());

    let aggregate = read_json(tmp.path().join("src/data/datasets.json"));
    let list = aggregate.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], json!("us_indices"));
    assert!(list[0].get("data").is_none());
}

#[tokio::test]
async fn empty_input_without_reason_is_only_a_warning() {
    let tmp = tempfile::tempdir().unwrap();
    let provider = MemoryProvider::new().with_empty("us_indices", None).with_table(
        "fred_gdp",
        table(vec![json!({"series_id": "GDP", "date": "2024-01-01", "value": "28000.5"})]),
    );

    let report = Preparer::new(provider, writer(tmp.path()))
        .run(&catalog())
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.exit_status(), 0);
    assert_eq!(report.empty, 1);
    assert_eq!(report.written, 1);
    assert!(!tmp.path().join("public/data/us_indices.json").exists());
    assert!(tmp.path().join("public/data/fred_gdp.json").exists());
}

#[tokio::test]
async fn empty_input_with_reported_reason_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let provider = MemoryProvider::new()
        .with_empty("us_indices", Some("rate limited".to_string()))
        .with_empty("fred_gdp", None);

    let report = Preparer::new(provider, writer(tmp.path()))
        .run(&catalog())
        .await
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.written, 0);
    assert_eq!(report.empty, 1);
    assert_eq!(report.error_lines().len(), 1);
    assert!(report.error_lines()[0].starts_with("us_indices: "));
    assert!(report.error_lines()[0].contains("rate limited"));
    assert!(!tmp.path().join("public/data/us_indices.json").exists());
    assert_eq!(read_json(tmp.path().join("src/data/datasets.json")), json!([]));
}

#[tokio::test]
async fn stale_outputs_are_removed_unless_disabled() {
    let tmp = tempfile::tempdir().unwrap();
    let public = tmp.path().join("public/data");
    std::fs::create_dir_all(&public).unwrap();
    std::fs::write(public.join("removed_dataset.json"), "{}").unwrap();

    let keep = Preparer::new(MemoryProvider::new(), writer(tmp.path())).with_options(RunOptions {
        clean_output: false,
        ..Default::default()
    });
    keep.run(&catalog()).await.unwrap();
    assert!(public.join("removed_dataset.json").exists());

    let clean = Preparer::new(MemoryProvider::new(), writer(tmp.path()));
    clean.run(&catalog()).await.unwrap();
    assert!(!public.join("removed_dataset.json").exists());
}

#[tokio::test]
async fn storage_directory_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("collector");
    std::fs::create_dir_all(data.join("raw")).unwrap();
    std::fs::write(
        data.join("raw/us_indices.csv"),
        "symbol,date,open,high,low,close,volume,_fetched_at\n\
         SPY,2024-01-02,469.0,471.0,468.0,470.0,20,x\n\
         SPY,2024-01-03,470.0,472.0,469.5,471.0,10,x\n\
         SPY,2024-01-12,471.0,476.0,470.0,475.0,,x\n",
    )
    .unwrap();
    std::fs::write(
        data.join("index.json"),
        json!({
            "datasets": {
                "us_indices": {
                    "file_path": "raw/us_indices.csv",
                    "fetched_at": "2024-01-13T06:00:00Z"
                },
                "fred_gdp": {
                    "file_path": "raw/fred_gdp.json",
                    "error": "FRED_API_KEY not set"
                }
            }
        })
        .to_string(),
    )
    .unwrap();

    let provider = StorageProvider::open(&data).await.unwrap();
    let report = Preparer::new(provider, writer(tmp.path()))
        .run(&catalog())
        .await
        .unwrap();

    assert_eq!(report.written, 1);
    assert_eq!(report.total_records, 3);
    assert_eq!(
        report.error_lines(),
        vec!["fred_gdp: 데이터 없음: FRED_API_KEY not set"]
    );

    let dataset = read_json(tmp.path().join("public/data/us_indices.json"));
    let spy = &dataset["stats"]["by_symbol"]["SPY"];
    assert_eq!(spy["close_std"], json!(2.6458));
    assert_eq!(spy["volume_total"], json!(30));
    assert_eq!(dataset["stats"]["date_range"]["days"], json!(10));
    assert_eq!(dataset["meta"]["format"], json!("csv"));
    assert_eq!(dataset["meta"]["fetched_at"], json!("2024-01-13T06:00:00+00:00"));
    assert_eq!(dataset["meta"]["primary_keys"], json!(["symbol", "date"]));
    assert_eq!(
        dataset["meta"]["columns"],
        json!(["symbol", "date", "open", "high", "low", "close", "volume"])
    );
    assert_eq!(dataset["data"][2]["volume"], Value::Null);
    assert_eq!(dataset["data"][0]["volume"], json!(20));
}
