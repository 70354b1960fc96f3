use crate::domain::model::{HttpMethod, PlatformSpec};
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url_template, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 平台 key → 「找不到頁面」標記字串
pub type MarkerMap = HashMap<String, Vec<String>>;

const DEFAULT_PLATFORMS: &[(&str, &str)] = &[
    ("github", "https://github.com/{username}"),
    ("gitlab", "https://gitlab.com/{username}"),
    ("bitbucket", "https://bitbucket.org/{username}/"),
    ("twitter", "https://twitter.com/{username}"),
    ("x", "https://x.com/{username}"),
    ("instagram", "https://www.instagram.com/{username}/"),
    ("reddit", "https://www.reddit.com/user/{username}"),
    ("stack_overflow", "https://stackoverflow.com/users/filter?search={username}"),
    ("keybase", "https://keybase.io/{username}"),
    ("medium", "https://medium.com/@{username}"),
    ("tiktok", "https://www.tiktok.com/@{username}"),
    ("mastodon_example", "https://mastodon.social/@{username}"),
    ("youtube", "https://www.youtube.com/@{username}"),
    ("hackernews", "https://news.ycombinator.com/user?id={username}"),
];

const DEFAULT_MARKERS: &[(&str, &[&str])] = &[
    ("github", &["Page not found", "Not Found"]),
    ("medium", &["Page Not Found"]),
    ("instagram", &["Sorry, this page isn't available."]),
];

/// 一次執行所使用的平台表與標記表
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformTable {
    platforms: Vec<PlatformSpec>,
    markers: MarkerMap,
}

impl Default for PlatformTable {
    fn default() -> Self {
        let platforms = DEFAULT_PLATFORMS
            .iter()
            .map(|(key, template)| PlatformSpec::new(*key, *template))
            .collect();

        let markers = DEFAULT_MARKERS
            .iter()
            .map(|(key, markers)| {
                (
                    key.to_string(),
                    markers.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect();

        Self { platforms, markers }
    }
}

impl PlatformTable {
    pub fn empty() -> Self {
        Self {
            platforms: Vec::new(),
            markers: MarkerMap::new(),
        }
    }

    pub fn platforms(&self) -> &[PlatformSpec] {
        &self.platforms
    }

    pub fn markers(&self) -> &MarkerMap {
        &self.markers
    }

    pub fn get(&self, key: &str) -> Option<&PlatformSpec> {
        self.platforms.iter().find(|p| p.key == key)
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// 同 key 覆蓋原有設定（保留位置），否則附加在最後。
    /// `markers` 為 `None` 時沿用既有標記。
    pub fn upsert(&mut self, spec: PlatformSpec, markers: Option<Vec<String>>) {
        let key = spec.key.clone();
        match self.platforms.iter_mut().find(|p| p.key == key) {
            Some(existing) => *existing = spec,
            None => self.platforms.push(spec),
        }

        if let Some(markers) = markers {
            if markers.is_empty() {
                self.markers.remove(&key);
            } else {
                self.markers.insert(key, markers);
            }
        }
    }

    pub fn merge(&mut self, file: PlatformFile) {
        for entry in file.platforms {
            let spec = PlatformSpec::new(entry.key, entry.url).with_method(entry.method);
            self.upsert(spec, entry.not_found_markers);
        }
    }

    /// 只保留指定的平台；未知的 key 視為設定錯誤
    pub fn retain_keys(&mut self, keys: &[String]) -> Result<()> {
        if let Some(unknown) = keys.iter().find(|k| self.get(k).is_none()) {
            let known: Vec<&str> = self.platforms.iter().map(|p| p.key.as_str()).collect();
            return Err(ProbeError::InvalidConfigValueError {
                field: "platforms".to_string(),
                value: unknown.clone(),
                reason: format!("Unknown platform. Known platforms: {}", known.join(", ")),
            });
        }

        self.platforms.retain(|p| keys.contains(&p.key));
        self.markers.retain(|key, _| keys.contains(key));
        Ok(())
    }
}

impl Validate for PlatformTable {
    fn validate(&self) -> Result<()> {
        if self.platforms.is_empty() {
            return Err(ProbeError::config("Platform table is empty"));
        }

        for platform in &self.platforms {
            validate_non_empty_string("platform.key", &platform.key)?;
            validate_url_template(
                &format!("platform.{}.url", platform.key),
                &platform.url_template,
            )?;
        }

        Ok(())
    }
}

/// 外部平台設定檔 (`[[platform]]` 陣列)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformFile {
    #[serde(default, rename = "platform")]
    pub platforms: Vec<PlatformEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub key: String,
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    pub not_found_markers: Option<Vec<String>>,
}

impl PlatformFile {
    /// 從 TOML 檔案載入
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProbeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProbeError::ConfigValidationError {
            field: "platform_config".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MASTODON_HOST})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ProbeError::config(format!("Invalid env pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}
