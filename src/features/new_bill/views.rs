use crate::features::bills::models::ExpenseType;
use crate::shared::ui::layout::vertical_layout;
use crate::shared::ui::Route;

fn expense_type_options() -> String {
    ExpenseType::ALL
        .iter()
        .map(|t| format!("\n                  <option>{}</option>", t.label()))
        .collect()
}

/// 新規作成フォームのマークアップを生成する
pub fn render_new_bill_page() -> String {
    format!(
        r#"<div class="layout">
      {layout}
      <div class="content">
        <div class="content-header">
          <div class="content-title"> Envoyer une note de frais </div>
        </div>
        <div class="form-newbill-container content-inner">
          <form data-testid="form-new-bill">
            <div class="row">
              <div class="col-md-6">
                <div class="col-half">
                  <label for="expense-type" class="bold-label">Type de dépense</label>
                  <select required class="form-control blue-border" data-testid="expense-type">{options}
                  </select>
                </div>
                <div class="col-half">
                  <label for="expense-name" class="bold-label">Nom de la dépense</label>
                  <input type="text" class="form-control blue-border" data-testid="expense-name" placeholder="Vol Paris Londres" />
                </div>
                <div class="col-half">
                  <label for="datepicker" class="bold-label">Date</label>
                  <input required type="date" class="form-control blue-border" data-testid="datepicker" />
                </div>
                <div class="col-half">
                  <label for="amount" class="bold-label">Montant TTC </label>
                  <input required type="number" class="form-control blue-border input-icon input-icon-right" data-testid="amount" placeholder="348"/>
                </div>
                <div class="col-half-row">
                  <div class="flex-col">
                    <label for="vat" class="bold-label">TVA</label>
                    <input type="number" class="form-control blue-border" data-testid="vat" placeholder="70" />
                  </div>
                  <div class="flex-col">
                    <input required type="number" class="form-control blue-border" data-testid="pct" placeholder="20" />
                  </div>
                </div>
              </div>
              <div class="col-md-6">
                <div class="col-half">
                  <label for="commentary" class="bold-label">Commentaire</label>
                  <textarea class="form-control blue-border" data-testid="commentary" rows="3"></textarea>
                </div>
                <div class="col-half">
                  <label for="file" class="bold-label">Justificatif</label>
                  <input required type="file" accept=".jpg,.jpeg,.png" class="form-control blue-border" data-testid="file" />
                </div>
              </div>
            </div>
            <div class="row">
              <div class="col-md-6">
                <div class="col-half">
                  <button type="submit" id="btn-send-bill" class="btn btn-primary">Envoyer</button>
                </div>
              </div>
            </div>
          </form>
        </div>
      </div>
    </div>"#,
        layout = vertical_layout(120, Some(Route::NewBill)),
        options = expense_type_options(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::count_test_id;

    #[test]
    fn test_form_fields_are_present() {
        let html = render_new_bill_page();

        for test_id in [
            "form-new-bill",
            "expense-type",
            "expense-name",
            "datepicker",
            "amount",
            "vat",
            "pct",
            "commentary",
            "file",
        ] {
            assert_eq!(count_test_id(&html, test_id), 1, "{test_id}");
        }
        assert!(html.contains("Envoyer</button>"));
    }

    #[test]
    fn test_expense_type_options() {
        let html = render_new_bill_page();

        assert_eq!(html.matches("<option>").count(), 7);
        assert!(html.contains("<option>Hôtel et logement</option>"));
        assert!(html.contains("<option>Fournitures de bureau</option>"));
    }

    #[test]
    fn test_mail_icon_is_highlighted() {
        let html = render_new_bill_page();
        assert!(html.contains(r#"data-testid="icon-mail" class="layout-icon active-icon""#));
    }
}
