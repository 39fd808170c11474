//! The DOM surface the page handlers work against.

use std::time::Duration;

/// Element ids the page handlers rely on.
pub mod ids {
    pub const PRODUCT_FORM: &str = "productForm";
    pub const PRODUCT_NAME: &str = "productName";
    pub const PRODUCT_PRICE: &str = "productPrice";
    pub const PRODUCT_DESCRIPTION: &str = "productDescription";
    pub const PRODUCT_QUANTITY: &str = "productQuantity";
    pub const CREATE_MESSAGE: &str = "createMessage";
    pub const SEARCH_ID: &str = "searchId";
    pub const SEARCH_MESSAGE: &str = "searchMessage";
    pub const PRODUCT_DETAILS: &str = "productDetails";
    pub const PRODUCT_LIST: &str = "productList";
    pub const LIST_MESSAGE: &str = "listMessage";
}

/// Class names the page handlers assign.
pub mod classes {
    /// Neutral (hidden) message box.
    pub const MESSAGE: &str = "message";
    pub const MESSAGE_SUCCESS: &str = "message success";
    pub const MESSAGE_ERROR: &str = "message error";
    /// Makes the product detail card visible.
    pub const SHOW: &str = "show";
    pub const PRODUCT_ITEM: &str = "product-item";
}

/// A document the page handlers can read from and render into.
///
/// All methods take `&self`: the document is shared by every handler and is
/// only ever touched from a single thread. Operations on ids that do not
/// exist are ignored.
#[allow(async_fn_in_trait)]
pub trait Page {
    /// Current value of a form field, empty if there is no such field.
    fn value(&self, id: &str) -> String;

    fn set_text(&self, id: &str, text: &str);

    /// Replace the whole class attribute.
    fn set_class_name(&self, id: &str, class_name: &str);

    fn add_class(&self, id: &str, class: &str);

    fn remove_class(&self, id: &str, class: &str);

    /// Replace the element's children with `html`.
    fn set_inner_html(&self, id: &str, html: &str);

    /// Append a `<div class="{class_name}">` holding `html` to the element.
    fn append_child(&self, id: &str, class_name: &str, html: &str);

    /// Reset all fields of a form to their initial value.
    fn reset_form(&self, id: &str);

    /// Replace the class attribute once `delay` has passed.
    ///
    /// Returns immediately.
    fn set_class_name_after(&self, id: &str, class_name: &str, delay: Duration);

    /// Ask the user to confirm an action.
    async fn confirm(&self, message: &str) -> bool;

    /// Tell the user something and wait for acknowledgement.
    fn alert(&self, message: &str);
}
