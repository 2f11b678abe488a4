/// 経費一覧機能モジュール
///
/// - 経費データモデルと表示用モデル
/// - リモートストア（一覧・作成・更新）
/// - 一覧画面のコンテナとマークアップ
pub mod container;
pub mod models;
pub mod store;
pub mod views;

pub use container::{sort_anti_chronological, BillsContainer, PLACEHOLDER_RECEIPT_IMAGE};
pub use models::{
    Bill, BillStatus, CreateBillRequest, CreatedBill, DisplayBill, ExpenseType,
    UpdateBillRequest, UploadedFile,
};
pub use store::{ApiBillStore, BillStore};
pub use views::{render_bills_page, BillsPageState};
