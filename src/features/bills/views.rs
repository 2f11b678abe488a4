use crate::features::bills::models::DisplayBill;
use crate::shared::ui::layout::{error_page, loading_page, vertical_layout};
use crate::shared::ui::Route;
use crate::shared::utils::{escape_html, format_amount};

const EYE_ICON: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24"><path d="M12 5C7 5 3 12 3 12s4 7 9 7 9-7 9-7-4-7-9-7zm0 11a4 4 0 110-8 4 4 0 010 8z"/></svg>"#;

/// 一覧画面の状態
#[derive(Debug, Clone, PartialEq)]
pub enum BillsPageState {
    Loading,
    Error(String),
    /// 表示順に並んだ経費
    Loaded(Vec<DisplayBill>),
}

fn actions(bill_url: Option<&str>) -> String {
    format!(
        r#"<div class="icon-actions">
        <div id="eye" data-testid="icon-eye" data-bill-url="{}">{EYE_ICON}</div>
      </div>"#,
        escape_html(bill_url.unwrap_or_default())
    )
}

fn row(bill: &DisplayBill) -> String {
    format!(
        r#"
    <tr>
      <td>{expense_type}</td>
      <td>{name}</td>
      <td data-testid="bill-date" data-date="{raw_date}">{display_date}</td>
      <td>{amount} €</td>
      <td><span class="{status_class}">{status_label}</span></td>
      <td>{actions}</td>
    </tr>"#,
        expense_type = escape_html(&bill.bill.expense_type),
        name = escape_html(&bill.bill.name),
        raw_date = escape_html(bill.raw_date()),
        display_date = escape_html(&bill.display_date),
        amount = format_amount(bill.bill.amount),
        status_class = bill.status_class,
        status_label = bill.status_label,
        actions = actions(bill.bill.file_url.as_deref()),
    )
}

fn modal() -> &'static str {
    r#"<div class="modal fade" id="modaleFile" tabindex="-1" role="dialog" aria-labelledby="exampleModalCenterTitle" aria-hidden="true">
      <div class="modal-dialog modal-dialog-centered modal-lg" role="document">
        <div class="modal-content">
          <div class="modal-header">
            <h5 class="modal-title" id="exampleModalLongTitle">Justificatif</h5>
            <button type="button" class="close" data-dismiss="modal" aria-label="Close">
              <span aria-hidden="true">&times;</span>
            </button>
          </div>
          <div class="modal-body">
          </div>
        </div>
      </div>
    </div>"#
}

/// 一覧画面のマークアップを生成する
///
/// 行は渡された順のまま表示する（並び替えはコンテナの責務）
pub fn render_bills_page(state: &BillsPageState) -> String {
    let bills = match state {
        BillsPageState::Loading => return loading_page(),
        BillsPageState::Error(message) => return error_page(message),
        BillsPageState::Loaded(bills) => bills,
    };

    let rows: String = bills.iter().map(row).collect();

    format!(
        r#"<div class="layout">
      {layout}
      <div class="content">
        <div class="content-header">
          <div class="content-title"> Mes notes de frais </div>
          <button type="button" data-testid="btn-new-bill" class="btn btn-primary">Nouvelle note de frais</button>
        </div>
        <div id="data-table">
        <table id="example" class="table table-striped" style="width:100%">
          <thead>
              <tr>
                <th>Type</th>
                <th>Nom</th>
                <th>Date</th>
                <th>Montant</th>
                <th>Statut</th>
                <th>Actions</th>
              </tr>
          </thead>
          <tbody data-testid="tbody">
            {rows}
          </tbody>
          </table>
        </div>
      </div>
      {modal}
    </div>"#,
        layout = vertical_layout(120, Some(Route::Bills)),
        modal = modal(),
    )
}
