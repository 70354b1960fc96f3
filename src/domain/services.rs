use crate::domain::model::{CheckTask, PlatformSpec};
use std::collections::HashSet;

/// 去除空白、略過空行並去重，保留第一次出現的順序
pub fn dedupe_usernames<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut usernames = Vec::new();

    for name in raw {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_string()) {
            usernames.push(name.to_string());
        }
    }

    usernames
}

/// 每行一個帳號的文字檔
pub fn parse_username_lines(content: &str) -> Vec<String> {
    dedupe_usernames(content.lines())
}

pub fn build_tasks(usernames: &[String], platforms: &[PlatformSpec]) -> Vec<CheckTask> {
    let mut tasks = Vec::with_capacity(usernames.len() * platforms.len());
    for username in usernames {
        for platform in platforms {
            tasks.push(CheckTask {
                username: username.clone(),
                platform: platform.key.clone(),
                url: platform.resolve_url(username),
                method: platform.method,
            });
        }
    }
    tasks
}
