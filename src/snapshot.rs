//! ロード済みページの不変スナップショット

use std::fmt;
use std::sync::Arc;

use crate::traits::DomQuery;

/// ロード済みページの最終URL・HTTPステータス・タイトル・HTML全文と
/// DOM問い合わせ能力をまとめた不変バンドル。
///
/// 1回の解析で生成され、スコアリング後に破棄される。
pub struct PageSnapshot {
    /// リダイレクト後の最終URL
    pub final_url: String,
    /// HTTPステータス（取得できなければ None）
    pub status: Option<u16>,
    /// ページタイトル
    pub title: String,
    /// レンダリング済みHTML全文
    pub html: String,
    /// 小文字化済みHTML（抽出器が繰り返し使うため一度だけ計算する）
    pub html_lower: String,
    /// DOM問い合わせ能力
    pub dom: Arc<dyn DomQuery>,
}

impl PageSnapshot {
    pub fn new(
        final_url: impl Into<String>,
        status: Option<u16>,
        title: impl Into<String>,
        html: impl Into<String>,
        dom: Arc<dyn DomQuery>,
    ) -> Self {
        let html = html.into();
        let html_lower = html.to_lowercase();
        Self {
            final_url: final_url.into(),
            status,
            title: title.into(),
            html,
            html_lower,
            dom,
        }
    }

    /// レポート用のステータス表記
    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "Unknown".to_string(),
        }
    }
}

impl fmt::Debug for PageSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSnapshot")
            .field("final_url", &self.final_url)
            .field("status", &self.status)
            .field("title", &self.title)
            .field("html_len", &self.html.len())
            .finish()
    }
}
