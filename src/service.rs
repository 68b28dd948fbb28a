//! 解析サービス
//!
//! tower::Service を実装した解析ファサードと、1回分の解析を
//! まとめて実行する run_analysis を提供する。

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tower::Service;
use tracing::{info, warn};
use url::Url;

use crate::acquire::BrowserAcquirer;
use crate::config::CheckerConfig;
use crate::error::CheckerError;
use crate::report::{self, RunMeta};
use crate::score::{self, ScoreResult};
use crate::signals::{self, SignalSet};
use crate::traits::PageAcquirer;

/// robots.txt 取得のタイムアウト（秒）
const ROBOTS_FETCH_TIMEOUT_SECS: u64 = 10;

/// 解析リクエスト
///
/// None のフィールドはベース設定の値をそのまま使う。
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub url: String,
    pub headless: Option<bool>,
    pub screenshot: Option<bool>,
}

impl AnalyzeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headless: None,
            screenshot: None,
        }
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = Some(headless);
        self
    }

    pub fn with_screenshot(mut self, screenshot: bool) -> Self {
        self.screenshot = Some(screenshot);
        self
    }

    /// ベース設定にリクエストの上書きを適用する
    pub fn apply_to(&self, mut config: CheckerConfig) -> CheckerConfig {
        if let Some(headless) = self.headless {
            config.headless = headless;
        }
        if let Some(screenshot) = self.screenshot {
            config.screenshot = screenshot;
        }
        config
    }
}

/// 解析結果
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeOutcome {
    pub run_id: String,
    pub final_url: String,
    pub status: Option<u16>,
    pub title: String,
    pub signals: SignalSet,
    pub result: ScoreResult,
    pub report: String,
    pub screenshot_path: Option<PathBuf>,
}

/// スキームがなければ https を補う
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// 1回分の解析を実行する
///
/// robots 判定 → ページ取得 → シグナル抽出 → スコアリング → レポート整形。
/// ページ取得が失敗してもブラウザは必ず解放される。
pub async fn run_analysis(
    config: &CheckerConfig,
    url: &str,
) -> Result<AnalyzeOutcome, CheckerError> {
    let url = normalize_url(url);
    let domain = Url::parse(&url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| url.clone());
    let run_id = format!("run_{}", Utc::now().timestamp());

    info!("Analyzing {} ({})", domain, run_id);

    // robots.txt はブラウザ起動前に判定する（失敗は Unknown に落ちる）
    let client = robots_client(config)?;
    let robots = signals::robots::check(&client, &url).await;

    let mut acquirer = BrowserAcquirer::new(config.clone());
    acquirer.initialize().await?;
    let acquired = acquirer.acquire(&url).await;
    let screenshot_path = acquirer.screenshot_path().map(|p| p.to_path_buf());
    if let Err(e) = acquirer.close().await {
        warn!("ブラウザ解放に失敗: {}", e);
    }
    let snapshot = acquired?;

    let signal_set = signals::collect(&snapshot, robots).await;
    let result = score::score(&signal_set, &config.weights);

    let meta = RunMeta {
        domain,
        status: snapshot.status_label(),
        final_url: snapshot.final_url.clone(),
        title: snapshot.title.clone(),
    };
    let report = report::render(&meta, &signal_set, &result);

    info!(
        "Analysis complete: score={}/100 ({})",
        result.score, result.tier
    );

    Ok(AnalyzeOutcome {
        run_id,
        final_url: snapshot.final_url.clone(),
        status: snapshot.status,
        title: snapshot.title.clone(),
        signals: signal_set,
        result,
        report,
        screenshot_path,
    })
}

/// robots.txt 取得用の HTTP クライアント
///
/// プロキシ認証情報はここで適用する（ブラウザ側は --proxy-server のみ）。
fn robots_client(config: &CheckerConfig) -> Result<reqwest::Client, CheckerError> {
    let mut builder =
        reqwest::Client::builder().timeout(Duration::from_secs(ROBOTS_FETCH_TIMEOUT_SECS));

    if let Some(proxy) = &config.proxy {
        let mut p = reqwest::Proxy::all(&proxy.server)
            .map_err(|e| CheckerError::Config(format!("プロキシURLが不正です: {}", e)))?;
        if let (Some(user), Some(pass)) = (&proxy.username, &proxy.password) {
            p = p.basic_auth(user, pass);
        }
        builder = builder.proxy(p);
    }

    builder
        .build()
        .map_err(|e| CheckerError::Config(e.to_string()))
}

/// tower::Service を実装した解析サービス
#[derive(Debug, Clone, Default)]
pub struct CheckService {
    config: CheckerConfig,
}

impl CheckService {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }
}

impl Service<AnalyzeRequest> for CheckService {
    type Response = AnalyzeOutcome;
    type Error = CheckerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: AnalyzeRequest) -> Self::Future {
        info!("解析リクエスト受信: url={}", req.url);

        let config = req.apply_to(self.config.clone());
        Box::pin(async move { run_analysis(&config, &req.url).await })
    }
}
