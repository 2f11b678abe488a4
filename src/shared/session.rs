//! ログイン中ユーザーのセッション情報
//!
//! ブラウザ側では `localStorage.getItem("user")` に JSON で保存されている値。
//! コンテナは生成時にこの値を受け取り、内部でストレージを参照しない。

use crate::shared::errors::AppResult;
use serde::{Deserialize, Serialize};

/// ユーザー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// セッション情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
    /// 認証トークン（ストアへのリクエストで Bearer として送信）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
}

impl Session {
    /// 従業員セッションを作成
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
            jwt: None,
        }
    }

    /// 保存済みの "user" 値を解析する
    ///
    /// # 引数
    /// * `raw` - `{"type":"Employee","email":"..."}` 形式のJSON文字列
    pub fn from_user_json(raw: &str) -> AppResult<Self> {
        let session: Session = serde_json::from_str(raw)?;
        log::debug!(
            "セッションを読み込みました: type={:?}, email={}",
            session.user_type,
            session.email
        );
        Ok(session)
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }
}
