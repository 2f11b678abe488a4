use crate::shared::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// 月の略称（フランス語、先頭3文字を大文字始まりにしたもの）
const FRENCH_SHORT_MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// 日付文字列を一覧表示用のフランス語短縮形式に変換
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// `4 Avr. 04` のような表示用文字列、または解析失敗時はエラー
pub fn format_date(date_str: &str) -> AppResult<String> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("日付の形式が正しくありません: {date_str}")))?;

    let month = FRENCH_SHORT_MONTHS[date.month0() as usize];
    let year = date.year().rem_euclid(100);

    Ok(format!("{} {month}. {year:02}", date.day()))
}

/// HTML特殊文字をエスケープする
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 文字列先頭の整数部分を読み取る（`"500 €"` -> 500）
///
/// 先頭の空白と符号は許容する。数字が一つもなければ None
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// 金額を表示用文字列にフォーマット（小数点以下が0なら整数表示）
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

/// ファイル入力欄の値（`C:\fakepath\facture.jpg`）からファイル名部分を取り出す
pub fn file_name_from_input_value(value: &str) -> &str {
    value.rsplit(['\\', '/']).next().unwrap_or(value)
}
