use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 帳號存在與否的三態判定，JSON 中對應 `true` / `false` / `null`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Existence {
    Exists,
    Missing,
    Unknown,
}

impl From<Option<bool>> for Existence {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Existence::Exists,
            Some(false) => Existence::Missing,
            None => Existence::Unknown,
        }
    }
}

impl From<Existence> for Option<bool> {
    fn from(value: Existence) -> Self {
        match value {
            Existence::Exists => Some(true),
            Existence::Missing => Some(false),
            Existence::Unknown => None,
        }
    }
}

impl fmt::Display for Existence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Existence::Exists => "true",
            Existence::Missing => "false",
            Existence::Unknown => "unknown",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub key: String,
    pub url_template: String,
    #[serde(default)]
    pub method: HttpMethod,
}

impl PlatformSpec {
    pub fn new(key: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url_template: url_template.into(),
            method: HttpMethod::Get,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn resolve_url(&self, username: &str) -> String {
        self.url_template
            .replace(crate::utils::validation::USERNAME_PLACEHOLDER, username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTask {
    pub username: String,
    pub platform: String,
    pub url: String,
    pub method: HttpMethod,
}

/// 分類器輸出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub exists: Existence,
    pub note: String,
}

impl Verdict {
    pub fn new(exists: Existence, note: impl Into<String>) -> Self {
        Self {
            exists,
            note: note.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub username: String,
    pub platform: String,
    pub url: String,
    pub http_status: Option<u16>,
    pub exists: Existence,
    pub note: String,
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    pub fn from_task(task: CheckTask, http_status: Option<u16>, verdict: Verdict) -> Self {
        Self {
            username: task.username,
            platform: task.platform,
            url: task.url,
            http_status,
            exists: verdict.exists,
            note: verdict.note,
            checked_at: Utc::now(),
        }
    }
}
