//! Markup for the cart page.

use std::fmt::Write;

use bookcart_commerce::{Cart, Kobo};

use crate::config::WidgetConfig;

/// Escape text for interpolation into element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
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

/// Shown in place of the table when the cart has no items.
pub fn empty_cart_html(config: &WidgetConfig) -> String {
    format!(
        r#"<div class="cart-empty">{}</div>"#,
        escape_html(&config.text.empty_cart)
    )
}

/// Cart table plus the total/checkout footer.
///
/// Each remove button carries its row's `data-id` so handlers can be bound
/// without walking up to the row.
pub fn cart_table_html(cart: &Cart, total: Kobo, config: &WidgetConfig) -> String {
    let mut html = String::from(
        r#"<div class="table-wrapper"><table class="cart-table"><thead><tr><th>Book</th><th>Price</th><th></th></tr></thead><tbody>"#,
    );

    for item in cart.items() {
        // Writing to a String cannot fail.
        let _ = write!(
            html,
            r#"<tr data-id="{id}"><td class="cart-title">{title}</td><td class="cart-price">{price}</td><td><button class="btn btn-outline {remove_class}" data-id="{id}">{remove}</button></td></tr>"#,
            id = item.id,
            title = escape_html(&item.title),
            price = item.price_kobo.display(),
            remove_class = config.dom.remove_button_class,
            remove = escape_html(&config.text.remove_label),
        );
    }

    let _ = write!(
        html,
        r#"</tbody></table></div><div class="cart-footer"><span class="cart-total">Total: {total}</span><button id="{checkout_id}" class="btn btn-primary">{checkout}</button></div>"#,
        total = total.display(),
        checkout_id = config.dom.checkout_button_id,
        checkout = escape_html(&config.text.checkout_label),
    );

    html
}
