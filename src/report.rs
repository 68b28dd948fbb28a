//! レポート整形
//!
//! シグナルとスコアを人間可読のレポートに変換する。整形のみで副作用はなく、
//! 入力のシグナル・スコアを変更しない。

use crate::score::{ScoreResult, Tier};
use crate::signals::{RobotsStatus, SignalSet};

const SEPARATOR: &str = "============================================================";

/// レポートヘッダに載せる実行メタデータ
#[derive(Debug, Clone)]
pub struct RunMeta {
    /// 解析対象ドメイン
    pub domain: String,
    /// HTTPステータス表記（不明なら "Unknown"）
    pub status: String,
    /// リダイレクト後の最終URL
    pub final_url: String,
    /// ページタイトル
    pub title: String,
}

/// 固定順のレポートを生成する
pub fn render(meta: &RunMeta, signals: &SignalSet, result: &ScoreResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n🔍 Analyzing: {}\n", meta.domain));
    out.push_str(SEPARATOR);
    out.push('\n');

    match signals.robots {
        RobotsStatus::Allowed => out.push_str("✅ robots.txt allows scraping\n"),
        RobotsStatus::Disallowed => out.push_str("⚠️ robots.txt disallows scraping\n"),
        RobotsStatus::Unknown => out.push_str("❓ robots.txt unreadable or missing\n"),
    }

    out.push_str(&format!(
        "✅ HTTP status: {}, final URL after redirects: {}\n",
        meta.status, meta.final_url
    ));
    out.push_str(&format!("✅ Page loaded. Title: {}\n", meta.title));

    if signals.bot_protection {
        out.push_str("⚠️ Bot protection detected\n");
    } else {
        out.push_str("✅ No obvious bot protection\n");
    }

    if signals.technologies.is_empty() {
        out.push_str("ℹ️ No specific frameworks detected\n");
    } else {
        let labels: Vec<&str> = signals.technologies.iter().map(|t| t.label).collect();
        out.push_str(&format!("🧠 Detected technologies: {}\n", labels.join(", ")));
    }

    if signals.js_rendering {
        out.push_str("⚙️ JavaScript rendering required\n");
    } else {
        out.push_str("✅ Minimal JS rendering\n");
    }

    if signals.login {
        out.push_str("⚠️ Login/authentication required\n");
    } else {
        out.push_str("✅ No login required\n");
    }

    out.push_str(&format!("\n🧾 SCRAPABILITY SCORE: {}/100\n", result.score));
    let tier_label = match result.tier {
        Tier::Easy => "🟢 Easy",
        Tier::Moderate => "🟡 Moderate",
        Tier::Hard => "🔴 Hard",
    };
    out.push_str(&format!("🏁 Difficulty Level: {}\n", tier_label));

    out.push_str("\n🔧 Recommendations:\n");
    if signals.bot_protection {
        out.push_str("- Use rotating residential proxies\n");
        out.push_str("- Add random user-agents and delays\n");
    }
    if signals.js_rendering {
        out.push_str("- Use a rendering-capable fetcher (headless browser)\n");
    } else {
        out.push_str("- Static HTTP fetching may be sufficient\n");
    }
    if signals.login {
        out.push_str("- Implement login/authentication before scraping\n");
    }
    out.push_str("- Test selectors before bulk scraping\n");
    out.push_str(SEPARATOR);
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{score, ScoreWeights};
    use crate::signals::DetectedTech;

    fn meta() -> RunMeta {
        RunMeta {
            domain: "example.com".to_string(),
            status: "200".to_string(),
            final_url: "https://example.com/".to_string(),
            title: "Example".to_string(),
        }
    }

    fn clean_signals() -> SignalSet {
        SignalSet {
            robots: RobotsStatus::Allowed,
            bot_protection: false,
            technologies: Vec::new(),
            tech_penalty: 0,
            js_rendering: false,
            login: false,
        }
    }

    #[test]
    fn test_clean_report_lines() {
        let signals = clean_signals();
        let result = score(&signals, &ScoreWeights::default());
        let report = render(&meta(), &signals, &result);

        assert!(report.contains("🔍 Analyzing: example.com"));
        assert!(report.contains("✅ robots.txt allows scraping"));
        assert!(report.contains("ℹ️ No specific frameworks detected"));
        assert!(report.contains("🧾 SCRAPABILITY SCORE: 100/100"));
        assert!(report.contains("🏁 Difficulty Level: 🟢 Easy"));
        assert!(report.contains("- Static HTTP fetching may be sufficient"));
        assert!(report.contains("- Test selectors before bulk scraping"));
        assert!(!report.contains("rotating residential proxies"));
        assert!(!report.contains("Implement login/authentication"));
    }

    #[test]
    fn test_recommendations_gated_by_signals() {
        let signals = SignalSet {
            robots: RobotsStatus::Disallowed,
            bot_protection: true,
            technologies: vec![
                DetectedTech {
                    label: "React.js frontend",
                    weight: 15,
                },
                DetectedTech {
                    label: "Cloudflare protection",
                    weight: 20,
                },
            ],
            tech_penalty: 35,
            js_rendering: true,
            login: true,
        };
        let result = score(&signals, &ScoreWeights::default());
        let report = render(&meta(), &signals, &result);

        assert!(report.contains("⚠️ robots.txt disallows scraping"));
        assert!(report.contains(
            "🧠 Detected technologies: React.js frontend, Cloudflare protection"
        ));
        assert!(report.contains("- Use rotating residential proxies"));
        assert!(report.contains("- Use a rendering-capable fetcher (headless browser)"));
        assert!(report.contains("- Implement login/authentication before scraping"));
        assert!(!report.contains("- Static HTTP fetching may be sufficient"));
        assert!(report.contains("🏁 Difficulty Level: 🔴 Hard"));
    }

    #[test]
    fn test_unknown_robots_line() {
        let mut signals = clean_signals();
        signals.robots = RobotsStatus::Unknown;
        let result = score(&signals, &ScoreWeights::default());
        let report = render(&meta(), &signals, &result);

        assert!(report.contains("❓ robots.txt unreadable or missing"));
        assert!(report.contains("🧾 SCRAPABILITY SCORE: 95/100"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let signals = clean_signals();
        let result = score(&signals, &ScoreWeights::default());

        assert_eq!(
            render(&meta(), &signals, &result),
            render(&meta(), &signals, &result)
        );
    }
}
