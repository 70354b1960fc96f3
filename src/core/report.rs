use crate::domain::model::CheckResult;
use crate::domain::ports::ReportFormat;
use crate::utils::error::{ProbeError, Result};

pub const REPORT_FIELDS: [&str; 7] = [
    "username",
    "platform",
    "url",
    "http_status",
    "exists",
    "note",
    "checked_at",
];

pub fn render(results: &[CheckResult], format: ReportFormat) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Json => render_json(results),
        ReportFormat::Csv => render_csv(results),
    }
}

pub fn render_json(results: &[CheckResult]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(results)?)
}

/// 含逗號、引號或換行的欄位會被加上引號，不做字元替換
pub fn render_csv(results: &[CheckResult]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REPORT_FIELDS)?;

    for result in results {
        let http_status = result
            .http_status
            .map(|code| code.to_string())
            .unwrap_or_else(|| "none".to_string());
        let exists = result.exists.to_string();
        let checked_at = result.checked_at.to_rfc3339();

        writer.write_record([
            result.username.as_str(),
            result.platform.as_str(),
            result.url.as_str(),
            http_status.as_str(),
            exists.as_str(),
            result.note.as_str(),
            checked_at.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ProbeError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Existence;
    use chrono::{TimeZone, Utc};

    fn sample(username: &str, status: Option<u16>, exists: Existence, note: &str) -> CheckResult {
        CheckResult {
            username: username.to_string(),
            platform: "github".to_string(),
            url: format!("https://github.com/{}", username),
            http_status: status,
            exists,
            note: note.to_string(),
            checked_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_json_report_has_expected_keys() {
        let results = vec![
            sample("alice", Some(200), Existence::Exists, ""),
            sample("ghost", None, Existence::Unknown, "request_failed"),
        ];

        let bytes = render(&results, ReportFormat::Json).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n'), "report should be pretty-printed");

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);

        let first = rows[0].as_object().unwrap();
        let mut keys: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        keys.sort();
        let mut expected = REPORT_FIELDS.to_vec();
        expected.sort();
        assert_eq!(keys, expected);

        assert_eq!(first["exists"], serde_json::json!(true));
        assert_eq!(first["http_status"], serde_json::json!(200));
        assert_eq!(rows[1]["exists"], serde_json::Value::Null);
        assert_eq!(rows[1]["http_status"], serde_json::Value::Null);
        assert_eq!(rows[1]["note"], serde_json::json!("request_failed"));
    }

    #[test]
    fn test_json_report_round_trips_results() {
        let results = vec![sample("bob", Some(404), Existence::Missing, "")];
        let bytes = render_json(&results).unwrap();
        let parsed: Vec<CheckResult> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, results);
    }

    #[test]
    fn test_csv_report_renders_unknown_and_none() {
        let results = vec![
            sample("alice", Some(200), Existence::Exists, ""),
            sample("ghost", None, Existence::Unknown, "request_failed"),
        ];

        let text = String::from_utf8(render(&results, ReportFormat::Csv).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "username,platform,url,http_status,exists,note,checked_at");
        assert_eq!(
            lines[1],
            "alice,github,https://github.com/alice,200,true,,2024-05-01T12:00:00+00:00"
        );
        assert_eq!(
            lines[2],
            "ghost,github,https://github.com/ghost,none,unknown,request_failed,2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn test_csv_report_quotes_embedded_commas() {
        let results = vec![sample("a,b", Some(404), Existence::Missing, "")];

        let bytes = render_csv(&results).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(&record[0], "a,b");
        assert_eq!(&record[2], "https://github.com/a,b");
        assert_eq!(&record[4], "false");
    }

    #[test]
    fn test_empty_reports() {
        assert_eq!(render_json(&[]).unwrap(), b"[]");
        let csv_text = String::from_utf8(render_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv_text.trim_end(), REPORT_FIELDS.join(","));
    }
}
