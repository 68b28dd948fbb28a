//! chromiumoxide によるページ取得

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use rand::seq::SliceRandom;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::CheckerConfig;
use crate::error::CheckerError;
use crate::snapshot::PageSnapshot;
use crate::traits::{DomQuery, PageAcquirer};

use super::stealth;

/// リトライのバックオフ（ミリ秒）
const RETRY_BACKOFF_MS: u64 = 1000;
/// JSフレームワーク検出時の描画安定待機（ミリ秒）
const JS_SETTLE_WAIT_MS: u64 = 3000;
/// ロード直後に見るJSマーカー
const SETTLE_MARKERS: &[&str] = &[
    "_next",
    "reactroot",
    "data-reactroot",
    "window.__initial_state__",
];

/// ローテーション用のデスクトップUA
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119 Safari/537.36",
];

/// HTTPステータスの取得スクリプト
///
/// CDPはメインドキュメントのステータスを直接返さないため、
/// PerformanceNavigationTiming.responseStatus (Chromium 109+) を読む。
const STATUS_PROBE_SCRIPT: &str = r#"
(function() {
    try {
        var entries = performance.getEntriesByType('navigation');
        if (entries && entries.length && entries[0].responseStatus) {
            return entries[0].responseStatus;
        }
    } catch (e) {}
    return 0;
})()
"#;

pub struct BrowserAcquirer {
    config: CheckerConfig,
    browser: Option<Browser>,
    page: Option<Arc<Page>>,
    screenshot_path: Option<PathBuf>,
}

impl BrowserAcquirer {
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            config,
            browser: None,
            page: None,
            screenshot_path: None,
        }
    }

    fn get_page(&self) -> Result<&Arc<Page>, CheckerError> {
        self.page
            .as_ref()
            .ok_or_else(|| CheckerError::BrowserInit("ブラウザが初期化されていません".into()))
    }

    /// 保存したスクリーンショットのパス
    pub fn screenshot_path(&self) -> Option<&Path> {
        self.screenshot_path.as_deref()
    }

    /// 1回分のナビゲーション試行
    async fn try_navigate(&self, page: &Page, url: &str) -> Result<(), CheckerError> {
        match tokio::time::timeout(self.config.nav_timeout, page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(CheckerError::Navigation(e.to_string())),
            Err(_) => {
                return Err(CheckerError::Timeout(format!(
                    "ページロードが{}秒以内に完了しませんでした",
                    self.config.nav_timeout.as_secs()
                )))
            }
        }

        let _ = page.wait_for_navigation().await;

        // JSフレームワークの痕跡があれば描画安定まで追加待機
        let content = page
            .content()
            .await
            .map_err(|e| CheckerError::Navigation(e.to_string()))?;
        let lower = content.to_lowercase();
        if SETTLE_MARKERS.iter().any(|m| lower.contains(m)) {
            debug!(
                "JS markers present, waiting {}ms for render to settle",
                JS_SETTLE_WAIT_MS
            );
            sleep(Duration::from_millis(JS_SETTLE_WAIT_MS)).await;
        }

        Ok(())
    }

    /// HTTPステータスのベストエフォート取得
    async fn probe_status(&self, page: &Page) -> Option<u16> {
        let value: i64 = page
            .evaluate(STATUS_PROBE_SCRIPT)
            .await
            .ok()?
            .into_value()
            .ok()?;
        u16::try_from(value).ok().filter(|v| *v != 0)
    }

    /// フルページスクリーンショットを保存
    async fn capture_screenshot(&self, page: &Page, domain: &str) -> Result<PathBuf, CheckerError> {
        std::fs::create_dir_all(&self.config.screenshot_dir)?;
        let filename = format!("{}.png", domain.replace('.', "_"));
        let path = self.config.screenshot_dir.join(filename);

        let params = ScreenshotParams::builder().full_page(true).build();
        let bytes = page
            .screenshot(params)
            .await
            .map_err(|e| CheckerError::Screenshot(e.to_string()))?;

        if self.config.debug {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            debug!("Screenshot data:image/png;base64,{}", encoded);
        }

        std::fs::write(&path, &bytes)?;
        info!("スクリーンショット保存: {:?}", path);
        Ok(path)
    }
}

#[async_trait]
impl PageAcquirer for BrowserAcquirer {
    async fn initialize(&mut self) -> Result<(), CheckerError> {
        info!("Initializing browser...");

        // ユニークなユーザーデータディレクトリを生成
        let unique_id = format!(
            "{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );
        let user_data_dir = std::env::temp_dir().join(format!("scrapability-{}", unique_id));

        // Chrome パスを取得
        let chrome_path = std::env::var("CHROME_PATH")
            .or_else(|_| std::env::var("CHROMIUM_PATH"))
            .unwrap_or_else(|_| "chromium".to_string());

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .user_data_dir(&user_data_dir)
            .window_size(1920, 1080);

        if !self.config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .no_sandbox()
            .request_timeout(Duration::from_secs(60))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--ignore-certificate-errors");

        if let Some(proxy) = &self.config.proxy {
            builder = builder.arg(format!("--proxy-server={}", proxy.server));
        }

        if self.config.debug {
            builder = builder.arg("--enable-logging=stderr").arg("--v=1");
        }

        let browser_config = builder
            .build()
            .map_err(|e| CheckerError::BrowserInit(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CheckerError::BrowserInit(e.to_string()))?;

        // ハンドラータスクを起動
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CheckerError::BrowserInit(e.to_string()))?;

        // User-Agent をローテーション
        let ua = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);
        page.set_user_agent(SetUserAgentOverrideParams::new(ua))
            .await
            .map_err(|e| CheckerError::BrowserInit(e.to_string()))?;

        // ナビゲーション前に指紋偽装スクリプトを注入
        for script in stealth::init_scripts() {
            page.execute(AddScriptToEvaluateOnNewDocumentParams::new(script))
                .await
                .map_err(|e| CheckerError::BrowserInit(e.to_string()))?;
        }

        self.browser = Some(browser);
        self.page = Some(Arc::new(page));

        info!("Browser initialized");
        Ok(())
    }

    async fn acquire(&mut self, url: &str) -> Result<PageSnapshot, CheckerError> {
        let page = self.get_page()?.clone();

        let mut last_error: Option<CheckerError> = None;
        for attempt in 1..=self.config.max_attempts {
            match self.try_navigate(&page, url).await {
                Ok(()) => {
                    last_error = None;
                    break;
                }
                Err(e) => {
                    warn!(
                        "ナビゲーション失敗 ({}/{}): {}",
                        attempt, self.config.max_attempts, e
                    );
                    last_error = Some(e);
                    if attempt < self.config.max_attempts {
                        sleep(Duration::from_millis(RETRY_BACKOFF_MS)).await;
                    }
                }
            }
        }
        if let Some(e) = last_error {
            return Err(e);
        }

        let status = self.probe_status(&page).await;
        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .map(|u| u.to_string())
            .unwrap_or_else(|| url.to_string());
        let title = page
            .get_title()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| "No title".to_string());
        let html = page
            .content()
            .await
            .map_err(|e| CheckerError::Navigation(e.to_string()))?;

        info!("Page loaded: status={:?}, title={}", status, title);

        if self.config.screenshot {
            let domain = Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.to_string()))
                .unwrap_or_else(|| "page".to_string());
            match self.capture_screenshot(&page, &domain).await {
                Ok(path) => self.screenshot_path = Some(path),
                Err(e) => warn!("スクリーンショット取得に失敗: {}", e),
            }
        }

        let dom = Arc::new(PageDom { page: page.clone() });
        Ok(PageSnapshot::new(final_url, status, title, html, dom))
    }

    async fn close(&mut self) -> Result<(), CheckerError> {
        info!("Closing browser...");

        self.page = None;
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                debug!("browser close: {}", e);
            }
            let _ = browser.wait().await;
        }

        info!("Browser closed");
        Ok(())
    }
}

/// chromiumoxide Page に対する DomQuery 実装
struct PageDom {
    page: Arc<Page>,
}

#[async_trait]
impl DomQuery for PageDom {
    async fn matches(&self, selector: &str) -> Result<bool, CheckerError> {
        let quoted =
            serde_json::to_string(selector).map_err(|e| CheckerError::DomQuery(e.to_string()))?;
        let script = format!("document.querySelector({}) !== null", quoted);

        let result = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| CheckerError::DomQuery(e.to_string()))?;
        result
            .into_value::<bool>()
            .map_err(|e| CheckerError::DomQuery(e.to_string()))
    }

    async fn inner_text(&self, selector: &str) -> Result<String, CheckerError> {
        let quoted =
            serde_json::to_string(selector).map_err(|e| CheckerError::DomQuery(e.to_string()))?;
        let script = format!(
            "(function() {{ var el = document.querySelector({}); return el ? el.innerText : ''; }})()",
            quoted
        );

        let result = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| CheckerError::DomQuery(e.to_string()))?;
        result
            .into_value::<String>()
            .map_err(|e| CheckerError::DomQuery(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquirer_new_has_no_browser() {
        let acquirer = BrowserAcquirer::new(CheckerConfig::default());
        assert!(acquirer.browser.is_none());
        assert!(acquirer.page.is_none());
        assert!(acquirer.screenshot_path().is_none());
    }

    #[test]
    fn test_settle_markers_are_lowercase() {
        // HTMLは小文字化してから比較するため、マーカー側も小文字で持つ
        for marker in SETTLE_MARKERS {
            assert_eq!(*marker, marker.to_lowercase().as_str());
        }
    }
}
