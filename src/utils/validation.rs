use crate::utils::error::{ProbeError, Result};
use url::Url;

pub const USERNAME_PLACEHOLDER: &str = "{username}";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 模板必須剛好有一個 `{username}`，替換後要是合法的 http(s) URL
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    let occurrences = template.matches(USERNAME_PLACEHOLDER).count();
    if occurrences != 1 {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!(
                "Template must contain {} exactly once (found {})",
                USERNAME_PLACEHOLDER, occurrences
            ),
        });
    }

    let invalid = |reason: String| ProbeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: template.to_string(),
        reason,
    };

    let url = Url::parse(&template.replace(USERNAME_PLACEHOLDER, "probe"))
        .map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(format!("Unsupported URL scheme: {}", scheme))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
