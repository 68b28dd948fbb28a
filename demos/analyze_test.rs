use scrapability_checker::{run_analysis, CheckerConfig};

#[tokio::main]
async fn main() {
    // ログ設定
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // 環境変数から設定を取得
    let config = CheckerConfig::from_env().with_headless(false); // デバッグ用に表示モード
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.target_url.clone());

    println!("=== Scrapability Test ===");

    match run_analysis(&config, &url).await {
        Ok(outcome) => {
            println!("{}", outcome.report);
            println!("成功! スコア: {}/100", outcome.result.score);
        }
        Err(e) => {
            eprintln!("エラー: {}", e);
        }
    }
}
