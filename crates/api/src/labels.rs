//! Label documents for items a seller is about to bring to the event.
//!
//! Rendering is a pluggable collaborator behind [`LabelRenderer`]. The
//! handler freezes the items only after [`LabelRenderer::render`] returns
//! the finished bytes, so a failed render never locks anything.

use bazaar_core::category;
use bazaar_core::types::{DbId, MoneyInCents};
use bazaar_db::models::item::Item;

/// Failure while producing a label document.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Nothing to render")]
    Empty,

    #[error("Label rendering failed: {0}")]
    Render(String),
}

/// Produces the printable label document for a batch of items.
pub trait LabelRenderer: Send + Sync {
    /// `Content-Type` of the rendered document.
    fn content_type(&self) -> &'static str;

    fn render(&self, seller_id: DbId, items: &[Item]) -> Result<Vec<u8>, LabelError>;
}

/// Plain-text label sheet, one block per item.
///
/// ```text
/// ------------------------------
/// Item 17            Seller 4
/// Red boots
/// Shoes
/// 12.50 EUR          DONATION
/// ------------------------------
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLabelRenderer;

const RULE: &str = "------------------------------";

impl LabelRenderer for TextLabelRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn render(&self, seller_id: DbId, items: &[Item]) -> Result<Vec<u8>, LabelError> {
        if items.is_empty() {
            return Err(LabelError::Empty);
        }

        let mut out = String::new();
        for item in items {
            let category_name = category::find(item.category_id)
                .map(|c| c.name)
                .ok_or_else(|| {
                    LabelError::Render(format!("Item {} has unknown category", item.id))
                })?;

            out.push_str(RULE);
            out.push('\n');
            out.push_str(&format!("{:<19}Seller {seller_id}\n", format!("Item {}", item.id)));
            out.push_str(&item.description);
            out.push('\n');
            out.push_str(category_name);
            out.push('\n');
            let price = format!("{} EUR", format_price(item.price_in_cents));
            match (item.donation, item.charity) {
                (true, _) => out.push_str(&format!("{price:<19}DONATION\n")),
                (false, true) => out.push_str(&format!("{price:<19}CHARITY\n")),
                (false, false) => out.push_str(&format!("{price}\n")),
            }
        }
        out.push_str(RULE);
        out.push('\n');

        Ok(out.into_bytes())
    }
}

/// `1250` -> `"12.50"`.
pub fn format_price(price_in_cents: MoneyInCents) -> String {
    let sign = if price_in_cents < 0 { "-" } else { "" };
    let abs = price_in_cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
