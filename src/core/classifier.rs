use crate::config::platforms::MarkerMap;
use crate::domain::model::{Existence, Verdict};

/// 依 HTTP 狀態碼與平台標記字串判定帳號是否存在。
///
/// 判定順序：無回應 → 404 → 200（檢查標記）→ 301/302 → 403 → 429 → 其他。
/// 新增平台只需要在 `MarkerMap` 加一筆資料。
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    markers: MarkerMap,
}

impl Classifier {
    pub fn new(markers: MarkerMap) -> Self {
        Self { markers }
    }

    pub fn classify(&self, platform: &str, status: Option<u16>, body: Option<&str>) -> Verdict {
        let Some(status) = status else {
            return Verdict::new(Existence::Unknown, "request_failed");
        };

        match status {
            404 => Verdict::new(Existence::Missing, ""),
            200 => {
                if self.has_not_found_marker(platform, body.unwrap_or_default()) {
                    Verdict::new(Existence::Missing, format!("{}_not_found_page", platform))
                } else {
                    Verdict::new(Existence::Exists, "")
                }
            }
            301 | 302 => Verdict::new(Existence::Exists, "redirect"),
            403 => Verdict::new(Existence::Unknown, "forbidden"),
            429 => Verdict::new(Existence::Unknown, "rate_limited"),
            code => Verdict::new(Existence::Unknown, format!("status_{}", code)),
        }
    }

    fn has_not_found_marker(&self, platform: &str, body: &str) -> bool {
        self.markers
            .get(platform)
            .map(|markers| markers.iter().any(|marker| body.contains(marker.as_str())))
            .unwrap_or(false)
    }
}
