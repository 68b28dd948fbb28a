//! JSレンダリング要否の判定
//!
//! HTML内のフレームワーク痕跡を一次判定とし、body可視テキストの薄さで補強する。

use tracing::debug;

use crate::snapshot::PageSnapshot;

/// JSフレームワークの痕跡（小文字化済みHTMLに対して比較する）
const JS_MARKERS: &[&str] = &[
    "<noscript",
    "_next",
    "defer",
    "async",
    "reactroot",
    "data-reactroot",
    r#"id="__next""#,
    "window.__initial_state__",
];

/// body可視テキストの先頭何文字を見るか
const BODY_PROBE_CHARS: usize = 200;
/// これより短ければ「薄いページ」とみなす
const THIN_BODY_CHARS: usize = 50;

/// bodyテキストが読めない場合は必須扱い（保守的に倒す）
pub async fn detect(snapshot: &PageSnapshot) -> bool {
    let marker_found = JS_MARKERS.iter().any(|m| snapshot.html_lower.contains(m));

    match snapshot.dom.inner_text("body").await {
        Ok(text) => {
            let head: String = text.chars().take(BODY_PROBE_CHARS).collect();
            let head_len = head.trim().chars().count();
            if marker_found && head_len < THIN_BODY_CHARS {
                // 補強のみ。マーカーなしの薄いページを陽性に反転させることはない
                debug!("body text thin ({} chars), JS rendering corroborated", head_len);
            }
            marker_found
        }
        Err(e) => {
            debug!("body text probe failed, assuming JS rendering required: {}", e);
            true
        }
    }
}
