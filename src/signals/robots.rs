//! robots.txt 許可チェック
//!
//! 取得・パースの失敗はすべて Unknown に写し、この層の外へエラーを出さない。

use robotstxt::DefaultMatcher;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

/// ワイルドカードUA
const WILDCARD_AGENT: &str = "*";

/// robots.txt の許可状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RobotsStatus {
    Allowed,
    Disallowed,
    Unknown,
}

/// 対象URLから robots.txt のURLと判定対象パスを導出する。
/// スキームがない場合は https を補う。
pub fn robots_location(target: &str) -> Option<(String, String)> {
    let normalized = if target.contains("://") {
        target.to_string()
    } else {
        format!("https://{}", target)
    };
    let parsed = Url::parse(&normalized).ok()?;
    let host = parsed.host_str()?;

    let robots_url = match parsed.port() {
        Some(port) => format!("{}://{}:{}/robots.txt", parsed.scheme(), host, port),
        None => format!("{}://{}/robots.txt", parsed.scheme(), host),
    };

    Some((robots_url, parsed.path().to_string()))
}

/// HTTPレスポンスを三値判定に写す
///
/// 401/403 は「クローラ歓迎せず」、robots.txt 不在（404等）は制限なしとみなす。
pub(crate) fn interpret_response(status: u16, body: &str, path: &str) -> RobotsStatus {
    if status == 401 || status == 403 {
        return RobotsStatus::Disallowed;
    }
    if !(200..300).contains(&status) {
        return RobotsStatus::Allowed;
    }

    // 判定対象はフルURLではなくパス
    let mut matcher = DefaultMatcher::default();
    if matcher.one_agent_allowed_by_robots(body, WILDCARD_AGENT, path) {
        RobotsStatus::Allowed
    } else {
        RobotsStatus::Disallowed
    }
}

/// robots.txt を取得してワイルドカードUAの許可を判定する
pub async fn check(client: &reqwest::Client, target: &str) -> RobotsStatus {
    let Some((robots_url, path)) = robots_location(target) else {
        warn!("robots.txt URLを導出できません: {}", target);
        return RobotsStatus::Unknown;
    };
    debug!("Fetching robots.txt from {}", robots_url);

    let response = match client.get(&robots_url).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("robots.txt fetch failed: {}", e);
            return RobotsStatus::Unknown;
        }
    };

    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("robots.txt read failed: {}", e);
            return RobotsStatus::Unknown;
        }
    };

    interpret_response(status, &body, &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_location() {
        let (robots_url, path) = robots_location("https://example.com/shop/items?page=2").unwrap();
        assert_eq!(robots_url, "https://example.com/robots.txt");
        assert_eq!(path, "/shop/items");
    }

    #[test]
    fn test_robots_location_defaults_to_https() {
        let (robots_url, path) = robots_location("example.com/a").unwrap();
        assert_eq!(robots_url, "https://example.com/robots.txt");
        assert_eq!(path, "/a");
    }

    #[test]
    fn test_robots_location_keeps_port() {
        let (robots_url, _) = robots_location("http://localhost:8080/x").unwrap();
        assert_eq!(robots_url, "http://localhost:8080/robots.txt");
    }

    #[test]
    fn test_auth_errors_mean_disallowed() {
        assert_eq!(interpret_response(401, "", "/"), RobotsStatus::Disallowed);
        assert_eq!(interpret_response(403, "", "/"), RobotsStatus::Disallowed);
    }

    #[test]
    fn test_missing_robots_means_allowed() {
        assert_eq!(interpret_response(404, "", "/"), RobotsStatus::Allowed);
        assert_eq!(interpret_response(500, "", "/"), RobotsStatus::Allowed);
    }

    #[test]
    fn test_disallow_all_body() {
        let body = "User-agent: *\nDisallow: /\n";
        assert_eq!(interpret_response(200, body, "/"), RobotsStatus::Disallowed);
    }

    #[test]
    fn test_partial_disallow_body() {
        let body = "User-agent: *\nDisallow: /private/\n";
        assert_eq!(
            interpret_response(200, body, "/private/data"),
            RobotsStatus::Disallowed
        );
        assert_eq!(
            interpret_response(200, body, "/public"),
            RobotsStatus::Allowed
        );
    }

    #[test]
    fn test_empty_body_allows() {
        assert_eq!(interpret_response(200, "", "/"), RobotsStatus::Allowed);
    }
}
