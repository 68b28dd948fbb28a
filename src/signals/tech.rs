//! 技術スタック検出
//!
//! 静的テーブルを一巡するだけの純粋関数。テーブル走査なので
//! 同一ラベルの二重計上は起こらず、評価順も結果に影響しない。

use serde::Serialize;

/// 検出パターン
pub struct TechPattern {
    pub label: &'static str,
    /// いずれか1つでも部分一致すれば検出
    pub keywords: &'static [&'static str],
    /// ペナルティ重み
    pub weight: u32,
}

/// 静的パターンテーブル。重みは互換性のため固定。
pub const TECH_PATTERNS: &[TechPattern] = &[
    TechPattern {
        label: "WordPress CMS",
        keywords: &["wp-content", "wordpress"],
        weight: 5,
    },
    TechPattern {
        label: "Shopify store",
        keywords: &["shopify", "cdn.shopify.com"],
        weight: 8,
    },
    TechPattern {
        label: "React.js frontend",
        keywords: &["react.", "react-dom", "data-reactroot"],
        weight: 15,
    },
    TechPattern {
        label: "Next.js",
        keywords: &["_next", "__next_data__"],
        weight: 15,
    },
    TechPattern {
        label: "Vue.js frontend",
        keywords: &["vue"],
        weight: 15,
    },
    TechPattern {
        label: "Angular frontend",
        keywords: &["angular"],
        weight: 15,
    },
    TechPattern {
        label: "Cloudflare protection",
        keywords: &["cloudflare"],
        weight: 20,
    },
    TechPattern {
        label: "Wix Site",
        keywords: &["wixstatic", "wix.com"],
        weight: 10,
    },
    TechPattern {
        label: "Squarespace",
        keywords: &["squarespace"],
        weight: 10,
    },
    TechPattern {
        label: "Astro/Gatsby static",
        keywords: &["astro.build", "gatsby"],
        weight: 5,
    },
];

/// 検出された技術
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectedTech {
    pub label: &'static str,
    pub weight: u32,
}

/// 検出結果（ペナルティはこの段階ではクランプしない）
#[derive(Debug, Clone, Default)]
pub struct TechDetection {
    pub technologies: Vec<DetectedTech>,
    pub penalty: u32,
}

pub fn detect(html_lower: &str) -> TechDetection {
    let mut detection = TechDetection::default();

    for pattern in TECH_PATTERNS {
        if pattern.keywords.iter().any(|k| html_lower.contains(k)) {
            detection.technologies.push(DetectedTech {
                label: pattern.label,
                weight: pattern.weight,
            });
            detection.penalty += pattern.weight;
        }
    }

    detection
}
