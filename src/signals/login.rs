//! ログイン要求の検出
//!
//! フォーム構造の照会を優先し、読めない語彙はHTML全文へのフォールバックで拾う。

use tracing::debug;

use crate::snapshot::PageSnapshot;

/// ログインフォームのセレクタ
const LOGIN_SELECTORS: &[&str] = &[
    r#"input[type="password"]"#,
    r#"form[action*="login"]"#,
    r#"form[action*="signin"]"#,
];

/// フォールバックの語彙（小文字化済みHTMLに対して比較する）
const LOGIN_KEYWORDS: &[&str] = &["login", "sign in", "signin", "auth", "password", "sign-in"];

/// DOM照会に失敗した場合は要求あり扱い（保守的に倒す）
pub async fn detect(snapshot: &PageSnapshot) -> bool {
    for selector in LOGIN_SELECTORS {
        match snapshot.dom.matches(selector).await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => {
                debug!("DOM probe failed for {}: {}", selector, e);
                return true;
            }
        }
    }

    LOGIN_KEYWORDS
        .iter()
        .any(|k| snapshot.html_lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::testing::{snapshot_with, StaticDom};

    #[tokio::test]
    async fn test_password_input_is_positive() {
        let mut dom = StaticDom::default();
        dom.matching.insert(r#"input[type="password"]"#);
        let snapshot = snapshot_with("<html><body>members area</body></html>", dom);

        assert!(detect(&snapshot).await);
    }

    #[tokio::test]
    async fn test_keyword_fallback_is_positive() {
        let html = "<html><body>Please sign in to view prices</body></html>";
        let snapshot = snapshot_with(html, StaticDom::default());

        assert!(detect(&snapshot).await);
    }

    #[tokio::test]
    async fn test_probe_failure_counts_as_required() {
        let dom = StaticDom {
            broken: true,
            ..Default::default()
        };
        let snapshot = snapshot_with("<html><body>catalog</body></html>", dom);

        assert!(detect(&snapshot).await);
    }

    #[tokio::test]
    async fn test_open_page_is_negative() {
        let html = "<html><body>public catalog of garden tools</body></html>";
        let snapshot = snapshot_with(html, StaticDom::default());

        assert!(!detect(&snapshot).await);
    }
}
