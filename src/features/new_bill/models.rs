use crate::features::bills::models::{Bill, BillStatus, UploadedFile};
use crate::shared::utils::parse_leading_int;

/// TVAの割合が未入力のときの既定値
pub const DEFAULT_VAT_PERCENTAGE: u32 = 20;

/// ファイル選択欄
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileInputControl {
    /// 入力欄の値（`C:\fakepath\facture.jpg` の形式）
    pub value: String,
    pub files: Vec<UploadedFile>,
}

impl FileInputControl {
    /// ファイルを一つ選択した状態の入力欄
    pub fn with_file(file: UploadedFile) -> Self {
        Self {
            value: format!(r"C:\fakepath\{}", file.name),
            files: vec![file],
        }
    }

    /// 入力欄を空に戻す
    pub fn reset(&mut self) {
        self.value.clear();
        self.files.clear();
    }
}

/// 新規作成フォームに入力された値（入力欄の文字列のまま）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub expense_name: String,
    pub datepicker: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// ファイルアップロードで得た値
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedReceipt {
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub bill_id: Option<String>,
}

impl NewBillForm {
    /// フォームの値とアップロード結果から送信する経費を組み立てる
    ///
    /// 状態は常に `pending`、メールアドレスはセッションのもの
    pub fn to_bill(&self, receipt: &UploadedReceipt, email: &str) -> Bill {
        let amount = parse_leading_int(&self.amount).unwrap_or(0);
        let pct = parse_leading_int(&self.pct)
            .and_then(|p| u32::try_from(p).ok())
            .filter(|p| *p != 0)
            .unwrap_or(DEFAULT_VAT_PERCENTAGE);
        let vat = self.vat.trim().parse::<f64>().unwrap_or(0.0);

        Bill {
            id: receipt.bill_id.clone(),
            expense_type: self.expense_type.clone(),
            name: self.expense_name.clone(),
            date: self.datepicker.clone(),
            amount: amount as f64,
            vat,
            pct,
            commentary: self.commentary.clone(),
            file_url: receipt.file_url.clone(),
            file_name: receipt.file_name.clone(),
            status: BillStatus::Pending,
            email: email.to_string(),
            comment_admin: None,
        }
    }
}

/// ファイル選択の結果
#[derive(Debug, Clone, PartialEq)]
pub enum FileChangeOutcome {
    /// 拡張子が許可されていない（警告を表示し入力欄を空にした）
    Rejected,
    /// アップロード済み
    Uploaded(UploadedReceipt),
    /// アップロードに失敗した（画面には表示しない）
    Failed(String),
    /// ファイルが選択されていない
    NoFile,
}
