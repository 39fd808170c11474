//! An in-memory document.
//!
//! [`Document`] implements [`Page`] without a browser. Time only moves when
//! [`Document::advance`] is called, confirmation prompts are answered from a
//! queue, and every prompt and alert is kept for inspection.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tracing::{debug, warn};

use crate::page::{Page, ids};

/// State of a single element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub value: String,
    pub text: String,
    pub class_name: String,
    pub inner_html: String,
    pub children: Vec<Child>,
}

/// A `<div>` appended through [`Page::append_child`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub class_name: String,
    pub inner_html: String,
}

impl Element {
    fn with_class(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            ..Default::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    /// Markup of the element's content, appended children included.
    pub fn html(&self) -> String {
        let mut html = self.inner_html.clone();
        for child in &self.children {
            html.push_str(&format!(
                r#"<div class="{}">{}</div>"#,
                child.class_name, child.inner_html
            ));
        }
        html
    }
}

#[derive(Debug)]
struct Timer {
    due: Duration,
    id: String,
    class_name: String,
}

#[derive(Debug, Default)]
struct State {
    elements: HashMap<String, Element>,
    forms: HashMap<String, Vec<String>>,
    now: Duration,
    timers: Vec<Timer>,
    confirm_answers: VecDeque<bool>,
    prompts: Vec<String>,
    alerts: Vec<String>,
}

impl State {
    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        let element = self.elements.get_mut(id);
        if element.is_none() {
            warn!(id, "no such element");
        }
        element
    }
}

#[derive(Debug, Default)]
pub struct Document {
    state: RefCell<State>,
}

impl Document {
    /// An empty document without any elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with the elements of the catalog page.
    pub fn catalog() -> Self {
        let document = Self::new();
        document.insert_form(ids::PRODUCT_FORM, &[
            ids::PRODUCT_NAME,
            ids::PRODUCT_PRICE,
            ids::PRODUCT_DESCRIPTION,
            ids::PRODUCT_QUANTITY,
        ]);
        for message in [ids::CREATE_MESSAGE, ids::SEARCH_MESSAGE, ids::LIST_MESSAGE] {
            document.insert(message, Element::with_class("message"));
        }
        document.insert(ids::SEARCH_ID, Element::default());
        document.insert(ids::PRODUCT_DETAILS, Element::with_class("product-details"));
        document.insert(ids::PRODUCT_LIST, Element::with_class("product-list"));
        document
    }

    pub fn insert(&self, id: &str, element: Element) {
        self.state
            .borrow_mut()
            .elements
            .insert(id.to_string(), element);
    }

    /// Add a form and its (empty) fields.
    pub fn insert_form(&self, id: &str, fields: &[&str]) {
        self.insert(id, Element::default());
        for field in fields {
            self.insert(field, Element::default());
        }
        self.state.borrow_mut().forms.insert(
            id.to_string(),
            fields.iter().map(|field| field.to_string()).collect(),
        );
    }

    /// Snapshot of an element.
    pub fn element(&self, id: &str) -> Option<Element> {
        self.state.borrow().elements.get(id).cloned()
    }

    /// Type into a form field.
    pub fn set_value(&self, id: &str, value: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            element.value = value.to_string();
        }
    }

    pub fn text(&self, id: &str) -> String {
        self.element(id).map(|e| e.text).unwrap_or_default()
    }

    pub fn class_name(&self, id: &str) -> String {
        self.element(id).map(|e| e.class_name).unwrap_or_default()
    }

    pub fn html(&self, id: &str) -> String {
        self.element(id).map(|e| e.html()).unwrap_or_default()
    }

    /// Answer the next confirmation prompt. Unanswered prompts are accepted.
    pub fn answer_confirm(&self, answer: bool) {
        self.state.borrow_mut().confirm_answers.push_back(answer);
    }

    /// Confirmation prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.state.borrow().prompts.clone()
    }

    /// Alerts shown so far.
    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    /// Time elapsed since the document was created.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Move time forward, running every scheduled change that falls due.
    ///
    /// Changes run in order of their due time, ties in scheduling order.
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.borrow_mut();
        state.now += by;
        let now = state.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            state.timers.drain(..).partition(|timer| timer.due <= now);
        state.timers = pending;
        due.sort_by_key(|timer| timer.due);

        for timer in due {
            debug!(id = %timer.id, class_name = %timer.class_name, "running scheduled change");
            if let Some(element) = state.element_mut(&timer.id) {
                element.class_name = timer.class_name;
            }
        }
    }
}

impl Page for Document {
    fn value(&self, id: &str) -> String {
        self.element(id).map(|e| e.value).unwrap_or_default()
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            element.text = text.to_string();
        }
    }

    fn set_class_name(&self, id: &str, class_name: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            element.class_name = class_name.to_string();
        }
    }

    fn add_class(&self, id: &str, class: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            if !element.has_class(class) {
                if !element.class_name.is_empty() {
                    element.class_name.push(' ');
                }
                element.class_name.push_str(class);
            }
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            element.class_name = element
                .class_name
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            element.inner_html = html.to_string();
            element.children.clear();
        }
    }

    fn append_child(&self, id: &str, class_name: &str, html: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            element.children.push(Child {
                class_name: class_name.to_string(),
                inner_html: html.to_string(),
            });
        }
    }

    fn reset_form(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        let Some(fields) = state.forms.get(id).cloned() else {
            warn!(id, "no such form");
            return;
        };
        for field in fields {
            if let Some(element) = state.element_mut(&field) {
                element.value.clear();
            }
        }
    }

    fn set_class_name_after(&self, id: &str, class_name: &str, delay: Duration) {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        state.timers.push(Timer {
            due,
            id: id.to_string(),
            class_name: class_name.to_string(),
        });
    }

    async fn confirm(&self, message: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.prompts.push(message.to_string());
        state.confirm_answers.pop_front().unwrap_or(true)
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }
}
