// 機能モジュール
pub mod bills;
pub mod new_bill;
pub mod router;
