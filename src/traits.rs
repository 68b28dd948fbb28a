use async_trait::async_trait;
use tracing::warn;

use crate::error::CheckerError;
use crate::snapshot::PageSnapshot;

/// ページ取得器
///
/// ブラウザのライフサイクルを所有し、解析に必要な PageSnapshot を供給する。
#[async_trait]
pub trait PageAcquirer: Send + Sync {
    /// ブラウザ初期化
    async fn initialize(&mut self) -> Result<(), CheckerError>;

    /// 対象URLをロードして PageSnapshot を生成
    async fn acquire(&mut self, url: &str) -> Result<PageSnapshot, CheckerError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), CheckerError>;

    /// 一括実行（initialize → acquire → close）
    ///
    /// acquire が失敗した場合も close は必ず実行される。
    async fn execute(&mut self, url: &str) -> Result<PageSnapshot, CheckerError> {
        self.initialize().await?;
        let result = self.acquire(url).await;
        if let Err(e) = self.close().await {
            warn!("ブラウザ解放に失敗: {}", e);
        }
        result
    }
}

/// レンダリング済みDOMへの問い合わせ
#[async_trait]
pub trait DomQuery: Send + Sync {
    /// セレクタに一致する要素が存在するか
    async fn matches(&self, selector: &str) -> Result<bool, CheckerError>;

    /// セレクタに一致する要素の可視テキスト
    async fn inner_text(&self, selector: &str) -> Result<String, CheckerError>;
}
