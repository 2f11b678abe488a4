use crate::shared::utils::format_date;
use serde::{Deserialize, Deserializer, Serialize};

/// ノート・ド・フレ（経費精算）の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// 画面表示用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }

    /// 画面表示用のCSSクラス
    pub fn css_class(&self) -> &'static str {
        match self {
            BillStatus::Pending => "status-pending",
            BillStatus::Accepted => "status-accepted",
            BillStatus::Refused => "status-refused",
        }
    }
}

/// 経費の種類（新規作成フォームの選択肢）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseType {
    Transports,
    RestaurantsEtBars,
    HotelEtLogement,
    ServicesEnLigne,
    ItEtElectronique,
    EquipementEtMateriel,
    FournituresDeBureau,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 7] = [
        ExpenseType::Transports,
        ExpenseType::RestaurantsEtBars,
        ExpenseType::HotelEtLogement,
        ExpenseType::ServicesEnLigne,
        ExpenseType::ItEtElectronique,
        ExpenseType::EquipementEtMateriel,
        ExpenseType::FournituresDeBureau,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseType::Transports => "Transports",
            ExpenseType::RestaurantsEtBars => "Restaurants et bars",
            ExpenseType::HotelEtLogement => "Hôtel et logement",
            ExpenseType::ServicesEnLigne => "Services en ligne",
            ExpenseType::ItEtElectronique => "IT et électronique",
            ExpenseType::EquipementEtMateriel => "Equipement et matériel",
            ExpenseType::FournituresDeBureau => "Fournitures de bureau",
        }
    }
}

/// 経費データモデル
///
/// `id` はストアの作成処理が返すまで存在しない
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub expense_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// YYYY-MM-DD形式
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub vat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pct: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BillStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

/// `null` の項目は既定値として読む（1件の不完全な経費で一覧全体を失敗させない）
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// サーバーはTVA額を文字列で保存していることがあるため、数値と文字列の両方を受け付ける
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrString::Number(n)) => Ok(n),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(NumberOrString::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// 一覧表示用の経費
///
/// 元の `Bill` は変更せずに保持し、表示用の値を別に持つ
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBill {
    pub bill: Bill,
    pub display_date: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl DisplayBill {
    /// 日付を解析できない場合は元の文字列をそのまま表示する
    pub fn from_bill(bill: Bill) -> Self {
        let display_date = format_date(&bill.date).unwrap_or_else(|e| {
            log::warn!("日付のフォーマットに失敗しました: id={:?}, {e}", bill.id);
            bill.date.clone()
        });

        Self {
            display_date,
            status_label: bill.status.label(),
            status_class: bill.status.css_class(),
            bill,
        }
    }

    /// 並び替えに使う元の日付
    pub fn raw_date(&self) -> &str {
        &self.bill.date
    }
}

/// 領収書ファイル（ファイル選択イベントの間だけ存在する）
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new<S: Into<String>>(name: S, mime_type: S, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }
}

/// 作成リクエスト（ファイルと提出者のメールアドレス）
///
/// マルチパートで送るため JSON の Content-Type は付けない
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBillRequest {
    pub file: UploadedFile,
    pub email: String,
}

/// 作成レスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBill {
    pub file_url: String,
    /// 新しい経費のID
    pub key: String,
}

/// 更新リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBillRequest {
    /// JSONエンコードされた `Bill`
    pub data: String,
    /// 更新対象のID
    pub selector: Option<String>,
}

impl UpdateBillRequest {
    pub fn from_bill(bill: &Bill, selector: Option<String>) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: serde_json::to_string(bill)?,
            selector,
        })
    }

    /// `data` を `Bill` として読み戻す
    pub fn bill(&self) -> Result<Bill, serde_json::Error> {
        serde_json::from_str(&self.data)
    }
}
