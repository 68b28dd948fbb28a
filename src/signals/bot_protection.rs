//! ボット対策検出
//!
//! テキスト層（HTML全文の語彙マッチ）と構造層（チャレンジ要素のDOM照会）の論理和。

use tracing::debug;

use crate::snapshot::PageSnapshot;

/// テキスト層の語彙（小文字化済みHTMLに対して比較する）
const TEXTUAL_PATTERNS: &[&str] = &[
    "captcha",
    "recaptcha",
    "access denied",
    "bot detected",
    "unusual traffic",
    "are you human",
    "datadome",
    "perimeterx",
    "blocked",
    "cf-browser-verification",
    "checking your browser",
];

/// 構造層のチャレンジ要素セレクタ
const CHALLENGE_SELECTORS: &[&str] = &[
    r#"iframe[src*="recaptcha"]"#,
    ".g-recaptcha",
    r#"div[id="challenge-form"]"#,
    r#"div[class*="cf-browser-verification"]"#,
    r#"script[src*="perimeterx"]"#,
    r#"script[src*="datadome"]"#,
];

/// DOM照会に失敗した場合は検出扱い（見逃すより過剰に警告する）
pub async fn detect(snapshot: &PageSnapshot) -> bool {
    if TEXTUAL_PATTERNS
        .iter()
        .any(|p| snapshot.html_lower.contains(p))
    {
        return true;
    }

    for selector in CHALLENGE_SELECTORS {
        match snapshot.dom.matches(selector).await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => {
                debug!("DOM probe failed for {}: {}", selector, e);
                return true;
            }
        }
    }

    false
}
