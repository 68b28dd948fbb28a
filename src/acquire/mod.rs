//! ページ取得（ブラウザ制御）
//!
//! chromiumoxide のライフサイクル・指紋偽装・リトライ・スクリーンショットを
//! ここに閉じ込め、コアには PageSnapshot だけを渡す。

pub mod browser;
pub mod stealth;

pub use browser::BrowserAcquirer;
