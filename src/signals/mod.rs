//! シグナル抽出器
//!
//! PageSnapshot からスクレイピング難易度に効く観測値を取り出す。
//! 抽出器はそれぞれ独立しており、1つのスナップショットに対して順番に実行される。

pub mod bot_protection;
pub mod js_render;
pub mod login;
pub mod robots;
pub mod tech;

use serde::Serialize;

use crate::snapshot::PageSnapshot;

pub use robots::RobotsStatus;
pub use tech::DetectedTech;

/// 1回の解析で得られたシグナル一式
///
/// 構築後は変更しない。
#[derive(Debug, Clone, Serialize)]
pub struct SignalSet {
    /// robots.txt の許可状態
    pub robots: RobotsStatus,
    /// ボット対策の検出
    pub bot_protection: bool,
    /// 検出した技術スタック（検出順）
    pub technologies: Vec<DetectedTech>,
    /// 技術スタックのペナルティ合計（この段階ではクランプしない）
    pub tech_penalty: u32,
    /// JSレンダリング必須か
    pub js_rendering: bool,
    /// ログイン必須か
    pub login: bool,
}

/// 全抽出器を順番に実行して SignalSet を構築する
///
/// robots 判定はブラウザ起動前に済んでいるため引数で受け取る。
pub async fn collect(snapshot: &PageSnapshot, robots: RobotsStatus) -> SignalSet {
    let bot_protection = bot_protection::detect(snapshot).await;
    let detection = tech::detect(&snapshot.html_lower);
    let js_rendering = js_render::detect(snapshot).await;
    let login = login::detect(snapshot).await;

    SignalSet {
        robots,
        bot_protection,
        technologies: detection.technologies,
        tech_penalty: detection.penalty,
        js_rendering,
        login,
    }
}
