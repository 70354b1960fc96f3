use anyhow::Result;
use clap::Parser;
use handle_probe::core::Existence;
use handle_probe::domain::model::CheckResult;
use handle_probe::{CliConfig, LocalStorage, Orchestrator, ProbeEngine, ProbePipeline};
use httpmock::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// 只指向 mock server 的平台設定，避免測試打到真實網站
fn write_platform_config(dir: &Path, server: &MockServer) -> Result<String> {
    let content = format!(
        r#"
[[platform]]
key = "octo"
url = "{octo}"
not_found_markers = ["Page not found"]

[[platform]]
key = "lab"
url = "{lab}"
"#,
        octo = server.url("/octo/{username}"),
        lab = server.url("/lab/{username}"),
    );

    let path = dir.join("platforms.toml");
    std::fs::write(&path, content)?;
    Ok(path.to_str().unwrap().to_string())
}

async fn run_cli(args: &[&str]) -> Result<handle_probe::RunSummary> {
    let config = CliConfig::try_parse_from(args)?;
    let probe_config = config.probe_config()?;
    let orchestrator = Orchestrator::with_http(&probe_config)?;
    let pipeline = ProbePipeline::new(LocalStorage::default(), config, orchestrator);
    Ok(ProbeEngine::new(pipeline).run().await?)
}

#[tokio::test]
async fn test_end_to_end_json_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let octo_alice = server.mock(|when, then| {
        when.method(GET).path("/octo/alice");
        then.status(200).body("<h1>alice</h1>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/octo/bob");
        then.status(200).body("<title>Page not found</title>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/lab/alice");
        then.status(429);
    });
    server.mock(|when, then| {
        when.method(GET).path("/lab/bob");
        then.status(404);
    });

    let platform_config = write_platform_config(temp_dir.path(), &server)?;
    let output = temp_dir.path().join("out").join("results.json");
    let output = output.to_str().unwrap();

    let summary = run_cli(&[
        "handle-probe",
        "-u",
        "alice,bob,alice",
        "--platform-config",
        &platform_config,
        "--platforms",
        "octo,lab",
        "-o",
        output,
    ])
    .await?;

    octo_alice.assert();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.exists, 1);
    assert_eq!(summary.missing, 2);
    assert_eq!(summary.unknown, 1);

    let results: Vec<CheckResult> = serde_json::from_slice(&std::fs::read(output)?)?;
    assert_eq!(results.len(), 4);

    let find = |user: &str, platform: &str| {
        results
            .iter()
            .find(|r| r.username == user && r.platform == platform)
            .unwrap()
    };
    assert_eq!(find("alice", "octo").exists, Existence::Exists);
    assert_eq!(find("alice", "octo").note, "");
    assert_eq!(find("bob", "octo").note, "octo_not_found_page");
    assert_eq!(find("alice", "lab").note, "rate_limited");
    assert_eq!(find("bob", "lab").http_status, Some(404));
    assert!(find("bob", "lab").url.ends_with("/lab/bob"));

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_csv_report_from_input_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path_contains("/octo/");
        then.status(200).body("profile");
    });
    server.mock(|when, then| {
        when.method(GET).path_contains("/lab/");
        then.status(500);
    });

    let platform_config = write_platform_config(temp_dir.path(), &server)?;
    let input = temp_dir.path().join("users.txt");
    std::fs::write(&input, "  carol\n\ndave \ncarol\n")?;
    let output = temp_dir.path().join("results.csv");

    let summary = run_cli(&[
        "handle-probe",
        "-i",
        input.to_str().unwrap(),
        "--platform-config",
        &platform_config,
        "--platforms",
        "octo,lab",
        "-o",
        output.to_str().unwrap(),
        "-f",
        "csv",
        "-c",
        "2",
    ])
    .await?;

    assert_eq!(summary.total, 4);

    let mut reader = csv::Reader::from_path(&output)?;
    let headers = reader.headers()?.clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["username", "platform", "url", "http_status", "exists", "note", "checked_at"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    assert_eq!(rows.len(), 4);
    for row in &rows {
        match &row[1] {
            "octo" => assert_eq!((&row[3], &row[4], &row[5]), ("200", "true", "")),
            "lab" => assert_eq!((&row[3], &row[4], &row[5]), ("500", "unknown", "status_500")),
            other => panic!("unexpected platform {}", other),
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_unreachable_platform_still_yields_every_record() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let platform_config = temp_dir.path().join("dead.toml");
    std::fs::write(
        &platform_config,
        "[[platform]]\nkey = \"dead\"\nurl = \"http://127.0.0.1:1/{username}\"\n",
    )?;
    let output = temp_dir.path().join("results.json");

    let summary = run_cli(&[
        "handle-probe",
        "-u",
        "alice,bob,carol",
        "--platform-config",
        platform_config.to_str().unwrap(),
        "--platforms",
        "dead",
        "-o",
        output.to_str().unwrap(),
    ])
    .await?;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.unknown, 3);

    let results: Vec<CheckResult> = serde_json::from_slice(&std::fs::read(&output)?)?;
    assert!(results.iter().all(|r| r.exists == Existence::Unknown
        && r.note == "request_failed"
        && r.http_status.is_none()));

    Ok(())
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(404);
    });

    let platform_config = write_platform_config(temp_dir.path(), &server)?;
    // 輸出路徑是一個已存在的目錄
    let output = temp_dir.path().to_str().unwrap().to_string();

    let result = run_cli(&[
        "handle-probe",
        "-u",
        "alice",
        "--platform-config",
        &platform_config,
        "--platforms",
        "octo",
        "-o",
        &output,
    ])
    .await;

    assert!(result.is_err());
    Ok(())
}
