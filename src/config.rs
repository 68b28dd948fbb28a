use std::path::PathBuf;
use std::time::Duration;

use crate::score::ScoreWeights;

/// プロキシ設定
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// プロキシサーバURL (例: "http://proxy.example.com:8181")
    pub server: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// 解析対象のデフォルトURL
    pub target_url: String,
    /// ヘッドレスモード
    pub headless: bool,
    /// スクリーンショットを保存するか
    pub screenshot: bool,
    /// スクリーンショット保存先
    pub screenshot_dir: PathBuf,
    /// ナビゲーションタイムアウト（1試行あたり）
    pub nav_timeout: Duration,
    /// ナビゲーション最大試行回数
    pub max_attempts: u32,
    /// プロキシ設定
    pub proxy: Option<ProxyConfig>,
    /// スコアのペナルティ重み
    pub weights: ScoreWeights,
    /// デバッグモード
    pub debug: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            target_url: "https://example.com".to_string(),
            headless: true,
            screenshot: true,
            screenshot_dir: PathBuf::from("./screenshots"),
            nav_timeout: Duration::from_secs(45),
            max_attempts: 3,
            proxy: None,
            weights: ScoreWeights::default(),
            debug: false,
        }
    }
}

impl CheckerConfig {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Default::default()
        }
    }

    /// 環境変数から設定を構築する（プロセス起動時に一度だけ呼ぶ）
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("TEST_URL") {
            if !url.is_empty() {
                config.target_url = url;
            }
        }
        if let Ok(value) = std::env::var("HEADLESS") {
            config.headless = parse_truthy(&value);
        }
        if let Ok(dir) = std::env::var("SCREENSHOT_DIR") {
            if !dir.is_empty() {
                config.screenshot_dir = PathBuf::from(dir);
            }
        }
        if let Some(server) = std::env::var("PROXY").ok().filter(|s| !s.is_empty()) {
            config.proxy = Some(ProxyConfig {
                server,
                username: std::env::var("PROXY_USER").ok().filter(|s| !s.is_empty()),
                password: std::env::var("PROXY_PASS").ok().filter(|s| !s.is_empty()),
            });
        }

        config
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_screenshot(mut self, screenshot: bool) -> Self {
        self.screenshot = screenshot;
        self
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    pub fn with_nav_timeout(mut self, timeout: Duration) -> Self {
        self.nav_timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

fn parse_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
