use super::Route;
use crate::shared::utils::escape_html;

const WINDOW_ICON: &str = r#"<svg width="32" height="32" viewBox="0 0 32 32"><rect x="4" y="6" width="24" height="20" rx="2"/></svg>"#;
const MAIL_ICON: &str = r#"<svg width="32" height="32" viewBox="0 0 32 32"><path d="M4 8h24v16H4z M4 8l12 9 12-9"/></svg>"#;

fn icon_class(active: bool) -> &'static str {
    if active {
        "layout-icon active-icon"
    } else {
        "layout-icon"
    }
}

/// 左側の縦型ナビゲーション
///
/// 一覧画面では `icon-window`、新規作成画面では `icon-mail` が強調される
pub fn vertical_layout(height: u32, active: Option<Route>) -> String {
    format!(
        r#"<div class="vertical-navbar" style="height: {height}vh;">
      <div class="layout-title"><span>Billed</span></div>
      <div id="layout-icon1" data-testid="icon-window" class="{window_class}">{WINDOW_ICON}</div>
      <div id="layout-icon2" data-testid="icon-mail" class="{mail_class}">{MAIL_ICON}</div>
    </div>"#,
        window_class = icon_class(active == Some(Route::Bills)),
        mail_class = icon_class(active == Some(Route::NewBill)),
    )
}

/// 読み込み中の画面
pub fn loading_page() -> String {
    format!(
        r#"<div class="layout">
      {}
      <div class="content" id="loading">
        Loading...
      </div>
    </div>"#,
        vertical_layout(120, None)
    )
}

/// エラー画面（メッセージはエスケープして表示）
pub fn error_page(message: &str) -> String {
    format!(
        r#"<div class="layout">
      {}
      <div class="content">
        <div class="content-header">
          <div class="content-title"> Erreur </div>
        </div>
        <div data-testid="error-message">
          {}
        </div>
      </div>
    </div>"#,
        vertical_layout(120, None),
        escape_html(message)
    )
}
