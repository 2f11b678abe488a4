// 共通モジュール
pub mod api_client;
pub mod config;
pub mod errors;
pub mod session;
pub mod ui;
pub mod utils;

pub use errors::{AppError, AppResult};
pub use session::Session;
