// 経費の新規作成機能モジュール

pub mod container;
pub mod models;
pub mod views;

pub use container::{has_allowed_extension, NewBillContainer, INVALID_FILE_MESSAGE};
pub use models::{
    FileChangeOutcome, FileInputControl, NewBillForm, UploadedReceipt, DEFAULT_VAT_PERCENTAGE,
};
pub use views::render_new_bill_page;
