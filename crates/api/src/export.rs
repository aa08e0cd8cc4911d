//! CSV export of the item listing.
//!
//! Fields are quoted only when they contain a comma, quote, or line break;
//! embedded quotes are doubled. Lines end with CRLF.

use bazaar_db::models::item::Item;

const HEADER: [&str; 10] = [
    "id",
    "addedAt",
    "description",
    "priceInCents",
    "categoryId",
    "sellerId",
    "donation",
    "charity",
    "frozen",
    "hidden",
];

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Render items as a CSV document with a header row.
pub fn items_to_csv(items: &[Item]) -> String {
    let mut out = String::new();
    write_record(&mut out, HEADER.iter().map(|h| h.to_string()));
    for item in items {
        write_record(
            &mut out,
            [
                item.id.to_string(),
                item.added_at.to_rfc3339(),
                item.description.clone(),
                item.price_in_cents.to_string(),
                item.category_id.to_string(),
                item.seller_id.to_string(),
                item.donation.to_string(),
                item.charity.to_string(),
                item.frozen.to_string(),
                item.hidden.to_string(),
            ],
        );
    }
    out
}

fn write_record(out: &mut String, fields: impl IntoIterator<Item = String>) {
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_field(out, &field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
