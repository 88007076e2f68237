//! Server-rendered HTML views.
//!
//! Plain string building; every piece of item data goes through [`escape`].

use std::fmt::Write;

use axum::http::StatusCode;

use crate::db::{Item, ItemId};
use crate::inventory::{
    EXPIRING_SOON_DAYS, InventoryReport, InventorySummary, LOW_STOCK_THRESHOLD,
};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;max-width:70rem}\
table{border-collapse:collapse;width:100%;margin-bottom:1.5rem}\
th,td{border:1px solid #ccc;padding:.35rem .5rem;text-align:left}\
form.inline{display:inline}\
.warn{background:#fff4e5}.error{color:#a00}";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Inventory</a> | <a href=\"/report\">Report</a></nav>\n\
         <h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

fn optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => escape(v),
        _ => "-".to_string(),
    }
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Read-only table of items (name, quantity, unit, price, expiry).
fn summary_table(items: &[Item]) -> String {
    if items.is_empty() {
        return "<p>None.</p>\n".to_string();
    }

    let mut html = String::from(
        "<table>\n<tr><th>Name</th><th>Quantity</th><th>Unit</th><th>Price</th><th>Expiry</th></tr>\n",
    );
    for item in items {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&item.name),
            item.quantity,
            optional(item.unit.as_deref()),
            money(item.price),
            optional(item.expiry_date.as_deref()),
        );
    }
    html.push_str("</table>\n");
    html
}

fn item_fields(item: Option<&Item>) -> String {
    let name = item.map(|i| escape(&i.name)).unwrap_or_default();
    let quantity = item.map(|i| i.quantity.to_string()).unwrap_or_default();
    let price = item.map(|i| i.price.to_string()).unwrap_or_default();
    let expiry = item
        .and_then(|i| i.expiry_date.as_deref())
        .map(escape)
        .unwrap_or_default();
    let unit = item
        .and_then(|i| i.unit.as_deref())
        .map(escape)
        .unwrap_or_default();

    format!(
        "<label>Name <input name=\"name\" value=\"{name}\" required></label>\n\
         <label>Quantity <input name=\"quantity\" value=\"{quantity}\" inputmode=\"numeric\" required></label>\n\
         <label>Price <input name=\"price\" value=\"{price}\" inputmode=\"decimal\" required></label>\n\
         <label>Expiry <input name=\"expiry_date\" type=\"date\" value=\"{expiry}\"></label>\n\
         <label>Unit <input name=\"unit\" value=\"{unit}\" placeholder=\"kg, pcs, L\"></label>\n"
    )
}

/// Index view: search box, add form, item table and aggregate panels.
pub fn index_page(items: &[Item], summary: &InventorySummary, search: &str) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<form method=\"get\" action=\"/\">\n\
         <input name=\"search\" value=\"{}\" placeholder=\"Search by name\">\n\
         <button type=\"submit\">Search</button>\n</form>\n",
        escape(search)
    );

    body.push_str("<h2>Add item</h2>\n<form method=\"post\" action=\"/add\">\n");
    body.push_str(&item_fields(None));
    body.push_str("<button type=\"submit\">Add</button>\n</form>\n");

    body.push_str("<h2>Items</h2>\n");
    if items.is_empty() {
        body.push_str("<p>No items.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>ID</th><th>Name</th><th>Quantity</th><th>Unit</th>\
             <th>Price</th><th>Expiry</th><th>Actions</th></tr>\n",
        );
        for item in items {
            let row_class = if item.quantity < LOW_STOCK_THRESHOLD {
                " class=\"warn\""
            } else {
                ""
            };
            let _ = writeln!(
                body,
                "<tr{row_class}><td>{id}</td><td>{name}</td><td>{quantity}</td><td>{unit}</td>\
                 <td>{price}</td><td>{expiry}</td><td>\
                 <form class=\"inline\" method=\"post\" action=\"/sell/{id}\"><button type=\"submit\">Sell</button></form> \
                 <a href=\"/edit/{id}\">Edit</a> \
                 <form class=\"inline\" method=\"post\" action=\"/delete/{id}\"><button type=\"submit\">Delete</button></form>\
                 </td></tr>",
                id = item.id,
                name = escape(&item.name),
                quantity = item.quantity,
                unit = optional(item.unit.as_deref()),
                price = money(item.price),
                expiry = optional(item.expiry_date.as_deref()),
            );
        }
        body.push_str("</table>\n");
    }

    let _ = writeln!(
        body,
        "<p><strong>Total inventory value:</strong> {}</p>",
        money(summary.total_value)
    );

    let _ = writeln!(
        body,
        "<h2>Low stock (under {})</h2>",
        LOW_STOCK_THRESHOLD
    );
    body.push_str(&summary_table(&summary.low_stock));

    let _ = writeln!(
        body,
        "<h2>Expiring within {} days</h2>",
        EXPIRING_SOON_DAYS
    );
    body.push_str(&summary_table(&summary.expiring_soon));

    layout("Inventory", &body)
}

/// Edit view. An unknown `id` renders an empty form that posts to the
/// same update route.
pub fn edit_page(id: ItemId, item: Option<&Item>) -> String {
    let mut body = String::new();
    if item.is_none() {
        let _ = writeln!(body, "<p class=\"error\">No item with ID {}.</p>", id);
    }
    let _ = writeln!(body, "<form method=\"post\" action=\"/update/{}\">", id);
    body.push_str(&item_fields(item));
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");

    layout("Edit item", &body)
}

/// Report view: low stock plus already expired or expiring today.
pub fn report_page(report: &InventoryReport) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<h2>Low stock (under {})</h2>", LOW_STOCK_THRESHOLD);
    body.push_str(&summary_table(&report.low_stock));

    body.push_str("<h2>Expired or expiring today</h2>\n");
    body.push_str(&summary_table(&report.expired));

    layout("Stock report", &body)
}

/// Error view for failed requests.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to inventory</a></p>\n",
        escape(message)
    );
    layout(
        &format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error")
        ),
        &body,
    )
}
