//! scrapability CLI
//!
//! URLを1つ解析してスクレイピング難易度レポートを出力する。

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scrapability_checker::{run_analysis, CheckerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "scrapability",
    about = "Scrapability checker — scores how hard a site is to scrape",
    version
)]
struct Cli {
    /// URL to analyze (falls back to TEST_URL)
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// Force headless mode
    #[arg(long, conflicts_with = "headed")]
    headless: bool,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Disable screenshot capture
    #[arg(long)]
    no_screenshot: bool,

    /// Emit the analysis result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = CheckerConfig::from_env();
    if cli.headless {
        config.headless = true;
    }
    if cli.headed {
        config.headless = false;
    }
    if cli.no_screenshot {
        config.screenshot = false;
    }

    let url = cli.url.clone().unwrap_or_else(|| config.target_url.clone());

    match run_analysis(&config, &url).await {
        Ok(outcome) => {
            if cli.json {
                match serde_json::to_string_pretty(&outcome) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("❌ JSON出力に失敗: {}", e),
                }
            } else {
                println!("{}", outcome.report);
            }
        }
        Err(e) => {
            // リトライ上限到達などの終端エラー。スコアは出さずに終了する
            eprintln!("❌ Could not load page: {}", e);
        }
    }
}
