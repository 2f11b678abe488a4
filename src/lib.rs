// 機能モジュール構造
pub mod features;
pub mod shared;

#[cfg(test)]
mod test_support;

use features::bills::{ApiBillStore, BillStore};
use features::router::Router;
use log::{info, warn};
use shared::config::environment::{initialize_logging_system, load_environment_variables};
use shared::errors::AppResult;
use shared::session::Session;
use shared::ui::{Alert, Modal, PageSurface};
use std::sync::Arc;

/// 環境変数とログシステムを初期化する
///
/// .envファイルの読み込みをログシステムより先に行う
pub fn initialize() {
    load_environment_variables();
    initialize_logging_system();
    info!("アプリケーション初期化が完了しました");
}

/// APIサーバーに接続するルーターを組み立てる
///
/// # 引数
/// * `user_json` - 保存済みの "user" 値（`{"type":"Employee","email":"..."}`）
/// * `page` - ページ本文の描画先
/// * `modal` - 領収書プレビュー
/// * `alert` - 警告ダイアログ
pub fn build_router(
    user_json: &str,
    page: Arc<dyn PageSurface>,
    modal: Arc<dyn Modal>,
    alert: Arc<dyn Alert>,
) -> AppResult<Router> {
    let session = Session::from_user_json(user_json)?;
    if !session.is_employee() {
        warn!("従業員以外のセッションで従業員画面を開きます: email={}", session.email);
    }
    let store: Arc<dyn BillStore> = Arc::new(ApiBillStore::from_env(session.jwt.clone())?);

    info!("ルーターを作成しました: email={}", session.email);
    Ok(Router::new(Some(store), session, page, modal, alert))
}
