//! 経費一覧画面のコンテナ

use crate::features::bills::models::DisplayBill;
use crate::features::bills::store::BillStore;
use crate::features::bills::views::{render_bills_page, BillsPageState};
use crate::shared::errors::AppResult;
use crate::shared::ui::{Modal, Navigator, PageSurface, Route};
use crate::shared::utils::escape_html;
use log::{debug, info, warn};
use std::sync::Arc;

/// 領収書URLがない場合に表示する画像
pub const PLACEHOLDER_RECEIPT_IMAGE: &str = "/assets/images/bubble.png";

/// 経費を新しい日付順に並べる
///
/// 日付は YYYY-MM-DD 固定形式なので文字列比較で時系列比較になる。
/// 同じ日付の経費は取得順を保つ（安定ソート）
pub fn sort_anti_chronological(bills: &mut [DisplayBill]) {
    bills.sort_by(|a, b| b.raw_date().cmp(a.raw_date()));
}

/// プレビューモーダルの本文
pub fn receipt_preview_content(bill_url: Option<&str>, modal_width: u32) -> String {
    let src = match bill_url.map(str::trim) {
        Some(url) if !url.is_empty() && url != "null" => url,
        _ => PLACEHOLDER_RECEIPT_IMAGE,
    };
    let image_width = modal_width / 2;

    format!(
        r#"<div style="text-align: center;" class="bill-proof-container"><img width="{image_width}" src="{}" alt="Bill" /></div>"#,
        escape_html(src)
    )
}

/// 経費一覧画面のコンテナ
pub struct BillsContainer {
    store: Option<Arc<dyn BillStore>>,
    navigator: Arc<dyn Navigator>,
    modal: Arc<dyn Modal>,
}

impl BillsContainer {
    pub fn new(
        store: Option<Arc<dyn BillStore>>,
        navigator: Arc<dyn Navigator>,
        modal: Arc<dyn Modal>,
    ) -> Self {
        Self {
            store,
            navigator,
            modal,
        }
    }

    /// 「Nouvelle note de frais」ボタン
    pub fn handle_click_new_bill(&self) {
        debug!("新規作成画面へ遷移します");
        self.navigator.navigate(Route::NewBill);
    }

    /// 行の目のアイコン（`data-bill-url` の値を受け取る）
    pub fn handle_click_icon_eye(&self, bill_url: Option<&str>) {
        let content = receipt_preview_content(bill_url, self.modal.width());
        self.modal.show(&content);
    }

    /// ストアから経費を取得し、表示用に変換して新しい順に並べる
    ///
    /// ストアがない場合は空の一覧を返す
    pub async fn get_bills(&self) -> AppResult<Vec<DisplayBill>> {
        let Some(store) = &self.store else {
            warn!("ストアが設定されていないため経費一覧を取得できません");
            return Ok(Vec::new());
        };

        let bills = store.list().await?;
        let mut display: Vec<DisplayBill> = bills.into_iter().map(DisplayBill::from_bill).collect();
        sort_anti_chronological(&mut display);

        info!("経費一覧を表示用に整形しました: count={}", display.len());
        Ok(display)
    }

    /// 読み込み中画面を表示してから一覧またはエラーを描画する
    pub async fn render(&self, page: &dyn PageSurface) -> BillsPageState {
        page.set_content(render_bills_page(&BillsPageState::Loading));

        let state = match self.get_bills().await {
            Ok(bills) => BillsPageState::Loaded(bills),
            Err(e) => {
                log::log!(e.severity().log_level(), "経費一覧の取得に失敗しました: {e}");
                BillsPageState::Error(e.user_message().to_string())
            }
        };

        page.set_content(render_bills_page(&state));
        state
    }
}
