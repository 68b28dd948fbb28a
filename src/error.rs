use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("DOM照会エラー: {0}")]
    DomQuery(String),

    #[error("スクリーンショットエラー: {0}")]
    Screenshot(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),
}
