//! ブラウザ指紋の偽装スクリプト
//!
//! ナビゲーション前に Page.addScriptToEvaluateOnNewDocument で注入する。

use rand::seq::SliceRandom;

/// navigator.webdriver を消す
const WEBDRIVER_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined});";

/// window.chrome スタブ
const CHROME_RUNTIME_SCRIPT: &str = "window.chrome = window.chrome || { runtime: {} };";

/// plugins / mimeTypes / languages のスタブ
const NAVIGATOR_SCRIPT: &str = r#"
Object.defineProperty(navigator, 'plugins', {get: () => [1, 2, 3]});
Object.defineProperty(navigator, 'mimeTypes', {get: () => [1, 2, 3]});
Object.defineProperty(navigator, 'languages', {get: () => ['en-US', 'en']});
"#;

/// WebGLベンダー/レンダラーの候補
const WEBGL_VENDORS: &[&str] = &["Intel Inc.", "NVIDIA Corporation", "AMD"];
const WEBGL_RENDERERS: &[&str] = &["Intel Iris OpenGL", "NVIDIA GeForce GTX", "AMD Radeon RX"];

/// WebGL getParameter の偽装
/// (37445 = UNMASKED_VENDOR_WEBGL, 37446 = UNMASKED_RENDERER_WEBGL)
fn webgl_script(vendor: &str, renderer: &str) -> String {
    format!(
        r#"
try {{
  const getParameter = WebGLRenderingContext.prototype.getParameter;
  WebGLRenderingContext.prototype.getParameter = function(param) {{
    if (param === 37445) return '{vendor}';
    if (param === 37446) return '{renderer}';
    return getParameter.call(this, param);
  }};
}} catch (e) {{}}
"#
    )
}

/// 注入するスクリプト一式を生成する
pub fn init_scripts() -> Vec<String> {
    let mut rng = rand::thread_rng();
    let vendor = WEBGL_VENDORS
        .choose(&mut rng)
        .copied()
        .unwrap_or(WEBGL_VENDORS[0]);
    let renderer = WEBGL_RENDERERS
        .choose(&mut rng)
        .copied()
        .unwrap_or(WEBGL_RENDERERS[0]);

    vec![
        WEBDRIVER_SCRIPT.to_string(),
        CHROME_RUNTIME_SCRIPT.to_string(),
        NAVIGATOR_SCRIPT.to_string(),
        webgl_script(vendor, renderer),
    ]
}
