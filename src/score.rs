//! スコアリングエンジン
//!
//! SignalSet を 0–100 のスコアと難易度ラベルに写す純粋関数。

use serde::Serialize;

use crate::signals::{RobotsStatus, SignalSet};

/// ペナルティ重みテーブル
///
/// 定数を分散させず、デプロイごとに一箇所で差し替えられるようにする。
#[derive(Debug, Clone, Serialize)]
pub struct ScoreWeights {
    /// robots.txt が拒否
    pub robots_disallowed: u32,
    /// robots.txt 読み取り不能
    pub robots_unknown: u32,
    /// ボット対策検出
    pub bot_protection: u32,
    /// JSレンダリング必須
    pub js_rendering: u32,
    /// ログイン必須
    pub login: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            robots_disallowed: 15,
            robots_unknown: 5,
            bot_protection: 30,
            js_rendering: 12,
            login: 20,
        }
    }
}

/// 難易度ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Easy,
    Moderate,
    Hard,
}

impl Tier {
    /// 80以上 Easy / 50以上 Moderate / それ未満 Hard
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            Tier::Easy
        } else if score >= 50 {
            Tier::Moderate
        } else {
            Tier::Hard
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tier::Easy => "Easy",
            Tier::Moderate => "Moderate",
            Tier::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// スコアリング結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub tier: Tier,
}

/// 100点から5種のペナルティをすべて減算し、最後に一度だけ [0,100] にクランプする。
/// 途中経過が負になってもショートサーキットしない。
pub fn score(signals: &SignalSet, weights: &ScoreWeights) -> ScoreResult {
    let mut penalty: i64 = 0;

    penalty += match signals.robots {
        RobotsStatus::Allowed => 0,
        RobotsStatus::Disallowed => i64::from(weights.robots_disallowed),
        RobotsStatus::Unknown => i64::from(weights.robots_unknown),
    };

    if signals.bot_protection {
        penalty += i64::from(weights.bot_protection);
    }

    penalty += i64::from(signals.tech_penalty);

    if signals.js_rendering {
        penalty += i64::from(weights.js_rendering);
    }

    if signals.login {
        penalty += i64::from(weights.login);
    }

    let score = (100 - penalty).clamp(0, 100) as u8;
    ScoreResult {
        score,
        tier: Tier::for_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::DetectedTech;

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
    fn test_perfect_page_scores_100() {
        let result = score(&clean_signals(), &ScoreWeights::default());
        assert_eq!(result.score, 100);
        assert_eq!(result.tier, Tier::Easy);
    }

    #[test]
    fn test_unknown_robots_uses_unknown_penalty() {
        let mut signals = clean_signals();

        signals.robots = RobotsStatus::Unknown;
        assert_eq!(score(&signals, &ScoreWeights::default()).score, 95);

        signals.robots = RobotsStatus::Disallowed;
        assert_eq!(score(&signals, &ScoreWeights::default()).score, 85);
    }

    #[test]
    fn test_login_only_lands_on_easy_boundary() {
        let mut signals = clean_signals();
        signals.login = true;

        let result = score(&signals, &ScoreWeights::default());
        assert_eq!(result.score, 80);
        assert_eq!(result.tier, Tier::Easy);
    }

    #[test]
    fn test_stacked_signals_sum_before_clamp() {
        // 100 - 15 - 30 - 15 - 12 - 20 = 8
        let signals = SignalSet {
            robots: RobotsStatus::Disallowed,
            bot_protection: true,
            technologies: vec![DetectedTech {
                label: "React.js frontend",
                weight: 15,
            }],
            tech_penalty: 15,
            js_rendering: true,
            login: true,
        };

        let result = score(&signals, &ScoreWeights::default());
        assert_eq!(result.score, 8);
        assert_eq!(result.tier, Tier::Hard);
    }

    #[test]
    fn test_penalties_beyond_100_clamp_to_zero() {
        // 15 + 30 + 45 + 12 + 20 = 122
        let signals = SignalSet {
            robots: RobotsStatus::Disallowed,
            bot_protection: true,
            technologies: vec![
                DetectedTech {
                    label: "React.js frontend",
                    weight: 15,
                },
                DetectedTech {
                    label: "Vue.js frontend",
                    weight: 15,
                },
                DetectedTech {
                    label: "Angular frontend",
                    weight: 15,
                },
            ],
            tech_penalty: 45,
            js_rendering: true,
            login: true,
        };

        let result = score(&signals, &ScoreWeights::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, Tier::Hard);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_score(80), Tier::Easy);
        assert_eq!(Tier::for_score(79), Tier::Moderate);
        assert_eq!(Tier::for_score(50), Tier::Moderate);
        assert_eq!(Tier::for_score(49), Tier::Hard);
    }

    #[test]
    fn test_custom_weights_apply() {
        let weights = ScoreWeights {
            bot_protection: 25,
            js_rendering: 10,
            ..Default::default()
        };
        let mut signals = clean_signals();
        signals.bot_protection = true;
        signals.js_rendering = true;

        assert_eq!(score(&signals, &weights).score, 65);
    }
}
