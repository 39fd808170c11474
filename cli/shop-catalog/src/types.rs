//! Catalog wire types.
//!
//! These mirror the JSON documents exchanged with the products API.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::error::CatalogClientError;

/// Server assigned product identifier.
pub type ProductId = i64;

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// A product as returned by the read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub product_code: String,
    pub product_name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub active: Option<bool>,
}

/// Payload of the create and update endpoints.
///
/// `price` and `quantity` are `None` when the user input could not be read as
/// a number; they are then sent as `null` and the server decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_code: String,
    pub product_name: String,
    pub price: Option<f64>,
    pub description: String,
    pub quantity: Option<i64>,
    pub active: bool,
}

impl NewProduct {
    /// Assemble a payload from raw form input.
    ///
    /// The product code is derived from the name and new products are
    /// always active.
    pub fn from_form(name: &str, price: &str, description: &str, quantity: &str) -> Self {
        Self {
            product_code: product_code_from_name(name),
            product_name: name.to_string(),
            price: leading_float(price),
            description: description.to_string(),
            quantity: leading_integer(quantity),
            active: true,
        }
    }

    /// Assemble a payload from already validated values.
    pub fn new(name: &str, price: f64, description: &str, quantity: i64) -> Self {
        Self {
            product_code: product_code_from_name(name),
            product_name: name.to_string(),
            price: Some(price),
            description: description.to_string(),
            quantity: Some(quantity),
            active: true,
        }
    }
}

/// Derive a product code from a product name.
///
/// The name is uppercased and every run of whitespace becomes a single `-`,
/// so `"Wireless Mouse"` becomes `"WIRELESS-MOUSE"`.
pub fn product_code_from_name(name: &str) -> String {
    let mut code = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                code.push('-');
            }
            in_whitespace = true;
        } else {
            code.extend(c.to_uppercase());
            in_whitespace = false;
        }
    }
    code
}

/// Read the longest leading decimal number of `input`.
///
/// Leading whitespace is skipped and anything after the number is ignored,
/// e.g. `"12.5 EUR"` reads as `12.5`.
fn leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Read the longest leading integer of `input`, e.g. `"3.7"` reads as `3`.
fn leading_integer(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// The envelope every endpoint answers with.
///
/// The shape is trusted as is: a missing `success` reads as `false`, missing
/// `message` and `data` read as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
    /// Number of items, only sent by the list endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            count: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Treat `success: false` as an error.
    ///
    /// Callers that render the envelope themselves should match on
    /// [`ApiResponse::success`] instead.
    pub fn into_result(self) -> Result<Option<T>, CatalogClientError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(CatalogClientError::Rejected(
                self.message
                    .unwrap_or_else(|| "the catalog rejected the request".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn product_code_uppercases_and_hyphenates() {
        assert_eq!(product_code_from_name("Wireless Mouse"), "WIRELESS-MOUSE");
    }

    #[test]
    fn product_code_collapses_whitespace_runs() {
        assert_eq!(product_code_from_name("usb  c\thub"), "USB-C-HUB");
        assert_eq!(product_code_from_name(" desk lamp "), "-DESK-LAMP-");
        assert_eq!(product_code_from_name(""), "");
    }

    #[test]
    fn from_form_builds_active_payload() {
        let product = NewProduct::from_form("Wireless Mouse", "19.99", "", "5");
        assert_eq!(product, NewProduct {
            product_code: "WIRELESS-MOUSE".to_string(),
            product_name: "Wireless Mouse".to_string(),
            price: Some(19.99),
            description: String::new(),
            quantity: Some(5),
            active: true,
        });
    }

    #[test]
    fn numeric_fields_read_leading_numbers() {
        assert_eq!(leading_float("12.5 EUR"), Some(12.5));
        assert_eq!(leading_float("  .5"), Some(0.5));
        assert_eq!(leading_float("3."), Some(3.0));
        assert_eq!(leading_float("1e3x"), Some(1000.0));
        assert_eq!(leading_float("2e"), Some(2.0));
        assert_eq!(leading_float("-4"), Some(-4.0));
        assert_eq!(leading_float("abc"), None);
        assert_eq!(leading_float(""), None);
        assert_eq!(leading_float("-"), None);

        assert_eq!(leading_integer("3.7"), Some(3));
        assert_eq!(leading_integer(" 42 boxes"), Some(42));
        assert_eq!(leading_integer("+7"), Some(7));
        assert_eq!(leading_integer("x1"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn unparsable_numbers_serialize_as_null() {
        let product = NewProduct::from_form("Pen", "", "blue", "many");
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            json!({
                "productCode": "PEN",
                "productName": "Pen",
                "price": null,
                "description": "blue",
                "quantity": null,
                "active": true,
            })
        );
    }

    #[test]
    fn product_deserializes_from_camel_case() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "productCode": "DESK-LAMP",
            "productName": "Desk Lamp",
            "price": 24.5,
            "description": null,
            "quantity": 3,
            "active": true,
        }))
        .unwrap();
        assert_eq!(product.id, Some(7));
        assert_eq!(product.product_code, "DESK-LAMP");
        assert_eq!(product.description, None);
        assert_eq!(product.active, Some(true));
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let response: ApiResponse<Product> =
            serde_json::from_value(json!({ "status": 400, "error": "Bad Request" })).unwrap();
        assert!(!response.success);
        assert_eq!(response.message, None);
        assert_eq!(response.data, None);
    }

    #[test]
    fn envelope_reads_list_and_count() {
        let response: ApiResponse<Vec<Product>> = serde_json::from_value(json!({
            "success": true,
            "count": 0,
            "data": [],
        }))
        .unwrap();
        assert!(response.success);
        assert_eq!(response.count, Some(0));
        assert_eq!(response.data, Some(vec![]));
    }

    #[test]
    fn envelope_without_payload() {
        let response: ApiResponse<()> = serde_json::from_value(json!({
            "success": true,
            "message": "Product deleted successfully",
        }))
        .unwrap();
        assert!(response.success);
        assert_eq!(response.data, None);
    }

    #[test]
    fn into_result_rejects_failures() {
        let ok = ApiResponse::success(1).into_result().unwrap();
        assert_eq!(ok, Some(1));

        let err = ApiResponse::<i32>::failure("Product not found with id: 9")
            .into_result()
            .unwrap_err();
        assert!(matches!(err, CatalogClientError::Rejected(ref msg) if msg == "Product not found with id: 9"));
    }

    proptest! {
        #[test]
        fn product_code_has_no_whitespace(name in "\\PC{0,40}") {
            let code = product_code_from_name(&name);
            prop_assert!(!code.chars().any(char::is_whitespace));
            prop_assert!(!code.contains("--") || name.contains('-'));
        }

        #[test]
        fn product_code_is_idempotent(name in "[a-zA-Z0-9 \t]{0,40}") {
            let code = product_code_from_name(&name);
            prop_assert_eq!(product_code_from_name(&code), code);
        }
    }
}
