//! スクレイピング難易度チェッカー
//!
//! - 対象URLの robots.txt・ボット対策・技術スタック・JSレンダリング・
//!   ログイン要求を観測し、0–100 のスコアと難易度ラベルを算出する
//! - ブラウザ制御は chromiumoxide に委譲
//!
//! # サービス経由の使用例
//!
//! ```rust,ignore
//! use scrapability_checker::{AnalyzeRequest, CheckService, CheckerConfig};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = CheckService::new(CheckerConfig::from_env());
//!
//!     let request = AnalyzeRequest::new("https://example.com")
//!         .with_headless(true)
//!         .with_screenshot(false);
//!
//!     let outcome = service.call(request).await.unwrap();
//!     println!("{}", outcome.report);
//! }
//! ```
//!
//! # 低レベルAPIの使用例
//!
//! ```rust,ignore
//! use scrapability_checker::{run_analysis, CheckerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CheckerConfig::from_env();
//!     let outcome = run_analysis(&config, "https://example.com").await.unwrap();
//!     println!("score: {}/100", outcome.result.score);
//! }
//! ```

pub mod acquire;
pub mod config;
pub mod error;
pub mod report;
pub mod score;
pub mod service;
pub mod signals;
pub mod snapshot;
pub mod traits;

// 主要な型をリエクスポート
pub use acquire::BrowserAcquirer;
pub use config::{CheckerConfig, ProxyConfig};
pub use error::CheckerError;
pub use report::RunMeta;
pub use score::{score, ScoreResult, ScoreWeights, Tier};
pub use service::{run_analysis, AnalyzeOutcome, AnalyzeRequest, CheckService};
pub use signals::{DetectedTech, RobotsStatus, SignalSet};
pub use snapshot::PageSnapshot;
pub use traits::{DomQuery, PageAcquirer};
