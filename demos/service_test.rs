use scrapability_checker::{AnalyzeRequest, CheckService, CheckerConfig};
use tower::Service;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut service = CheckService::new(CheckerConfig::from_env());

    let request = AnalyzeRequest::new("https://example.com")
        .with_headless(true)
        .with_screenshot(false);

    println!("=== CheckService Test ===");

    match service.call(request).await {
        Ok(outcome) => {
            println!("{}", outcome.report);
            println!("成功! run_id: {}", outcome.run_id);
        }
        Err(e) => {
            eprintln!("エラー: {}", e);
        }
    }
}
