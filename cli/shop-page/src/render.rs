//! HTML fragments for products.

use indoc::formatdoc;
use shop_catalog::{Product, to_fixed};

/// Shown in the product list when there is nothing to list.
pub const EMPTY_STATE: &str =
    r#"<div class="empty-state"><p>No products found. Create one to get started!</p></div>"#;

const NOT_AVAILABLE: &str = "N/A";

/// The detail card of a single product.
pub fn product_details(product: &Product) -> String {
    formatdoc! {r#"
        <h3>{name}</h3>
        <div class="product-price">${price}</div>
        <p><strong>Code:</strong> {code}</p>
        <p><strong>Description:</strong> {description}</p>
        <p><strong>Quantity:</strong> {quantity}</p>
        <p><strong>ID:</strong> {id}</p>
        "#,
        name = escape_html(&product.product_name),
        price = to_fixed(product.price, 2),
        code = escape_html(&product.product_code),
        description = escape_html(description(product)),
        quantity = product.quantity,
        id = display_id(product),
    }
}

/// The content of one card in the product list.
///
/// The delete button calls the page's global `deleteProduct` with the
/// product's id; products without an id get no button.
pub fn product_item(product: &Product) -> String {
    let info = formatdoc! {r#"
        <div class="product-info">
            <h3>{name}</h3>
            <p><strong>Code:</strong> {code}</p>
            <p><strong>Price:</strong> <span class="product-price">${price}</span></p>
            <p><strong>Description:</strong> {description}</p>
            <p><strong>Quantity:</strong> {quantity}</p>
            <p><strong>ID:</strong> {id}</p>
        </div>
        "#,
        name = escape_html(&product.product_name),
        code = escape_html(&product.product_code),
        price = to_fixed(product.price, 2),
        description = escape_html(description(product)),
        quantity = product.quantity,
        id = display_id(product),
    };

    let Some(id) = product.id else {
        return info;
    };

    let actions = formatdoc! {r#"
        <div class="product-actions">
            <button onclick="deleteProduct({id})" class="btn btn-danger">Delete</button>
        </div>
        "#,
        id = id,
    };
    info + &actions
}

fn description(product: &Product) -> &str {
    product
        .description
        .as_deref()
        .filter(|description| !description.is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

fn display_id(product: &Product) -> String {
    product
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Escape text for use inside element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
