//! Browser bindings.
//!
//! On startup the product form is wired to [`CatalogPage::create_product`],
//! `getProduct` and `deleteProduct` are exposed on `window` for the page's
//! `onclick` attributes, and the product list is loaded once the DOM is
//! ready.

use std::rc::Rc;
use std::time::Duration;

use shop_catalog::{CatalogClient, CatalogClientConfig};
use tracing::{debug, error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::error::PageError;
use crate::handlers::CatalogPage;
use crate::page::{Page, ids};

/// [`Page`] backed by the browser's DOM.
#[derive(Debug, Clone)]
pub struct WebPage {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebPage {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { window, document })
    }

    fn element(&self, id: &str) -> Option<web_sys::Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            warn!(id, "no such element");
        }
        element
    }
}

fn log_js_error(result: Result<impl Sized, JsValue>, what: &str) {
    if let Err(err) = result {
        error!(?err, "{what} failed");
    }
}

impl Page for WebPage {
    fn value(&self, id: &str) -> String {
        let Some(element) = self.element(id) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else {
            warn!(id, "element is not a form field");
            String::new()
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn set_class_name(&self, id: &str, class_name: &str) {
        if let Some(element) = self.element(id) {
            element.set_class_name(class_name);
        }
    }

    fn add_class(&self, id: &str, class: &str) {
        if let Some(element) = self.element(id) {
            log_js_error(element.class_list().add_1(class), "classList.add");
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        if let Some(element) = self.element(id) {
            log_js_error(element.class_list().remove_1(class), "classList.remove");
        }
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        if let Some(element) = self.element(id) {
            element.set_inner_html(html);
        }
    }

    fn append_child(&self, id: &str, class_name: &str, html: &str) {
        let Some(parent) = self.element(id) else {
            return;
        };
        let child = match self.document.create_element("div") {
            Ok(child) => child,
            Err(err) => {
                error!(?err, "createElement failed");
                return;
            },
        };
        child.set_class_name(class_name);
        child.set_inner_html(html);
        log_js_error(parent.append_child(&child), "appendChild");
    }

    fn reset_form(&self, id: &str) {
        let Some(element) = self.element(id) else {
            return;
        };
        match element.dyn_ref::<HtmlFormElement>() {
            Some(form) => form.reset(),
            None => warn!(id, "element is not a form"),
        }
    }

    fn set_class_name_after(&self, id: &str, class_name: &str, delay: Duration) {
        let page = self.clone();
        let id = id.to_string();
        let class_name = class_name.to_string();
        let callback = Closure::once_into_js(move || page.set_class_name(&id, &class_name));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        log_js_error(
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    millis,
                ),
            "setTimeout",
        );
    }

    async fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or_else(|err| {
            error!(?err, "confirm failed");
            false
        })
    }

    fn alert(&self, message: &str) {
        log_js_error(self.window.alert_with_message(message), "alert");
    }
}

type BrowserCatalog = CatalogPage<CatalogClient, WebPage>;

fn log_outcome(operation: &str, result: Result<(), PageError>) {
    match result {
        Ok(()) => debug!(operation, "done"),
        // already rendered into the page
        Err(err) => debug!(operation, %err, "failed"),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());

    let page = WebPage::new()?;
    let client = CatalogClient::new(CatalogClientConfig::default())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let catalog: Rc<BrowserCatalog> = Rc::new(CatalogPage::new(client, page.clone()));

    bind_form(&page, &catalog)?;
    bind_globals(&page, &catalog)?;

    let load = {
        let catalog = Rc::clone(&catalog);
        move || {
            wasm_bindgen_futures::spawn_local(async move {
                log_outcome("getAllProducts", catalog.get_all_products().await);
            })
        }
    };

    if page.document.ready_state() == "loading" {
        let listener = Closure::once_into_js(load);
        page.document
            .add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())?;
    } else {
        load();
    }

    Ok(())
}

fn bind_form(page: &WebPage, catalog: &Rc<BrowserCatalog>) -> Result<(), JsValue> {
    let Some(form) = page.element(ids::PRODUCT_FORM) else {
        return Ok(());
    };

    let catalog = Rc::clone(catalog);
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let catalog = Rc::clone(&catalog);
        wasm_bindgen_futures::spawn_local(async move {
            log_outcome("createProduct", catalog.create_product().await);
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    // the listener lives as long as the page
    on_submit.forget();
    Ok(())
}

fn bind_globals(page: &WebPage, catalog: &Rc<BrowserCatalog>) -> Result<(), JsValue> {
    let get_product = {
        let catalog = Rc::clone(catalog);
        Closure::<dyn FnMut()>::new(move || {
            let catalog = Rc::clone(&catalog);
            wasm_bindgen_futures::spawn_local(async move {
                log_outcome("getProduct", catalog.get_product().await);
            });
        })
    };

    let delete_product = {
        let catalog = Rc::clone(catalog);
        Closure::<dyn FnMut(f64)>::new(move |id: f64| {
            let catalog = Rc::clone(&catalog);
            wasm_bindgen_futures::spawn_local(async move {
                log_outcome("deleteProduct", catalog.delete_product(id as i64).await);
            });
        })
    };

    js_sys::Reflect::set(
        &page.window,
        &JsValue::from_str("getProduct"),
        get_product.as_ref(),
    )?;
    js_sys::Reflect::set(
        &page.window,
        &JsValue::from_str("deleteProduct"),
        delete_product.as_ref(),
    )?;
    get_product.forget();
    delete_product.forget();
    Ok(())
}
