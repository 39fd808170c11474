//! The catalog page handlers.

use std::time::Duration;

use shop_catalog::{ApiResponse, ClientTrait, NewProduct, ProductId};
use tracing::{debug, error, instrument, warn};

use crate::error::PageError;
use crate::page::{Page, classes, ids};
use crate::render;

/// How long a create confirmation stays visible.
pub const MESSAGE_CLEAR_DELAY: Duration = Duration::from_millis(3000);

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";

/// The handlers of the catalog page.
///
/// Each handler performs at most one catalog request of its own, renders
/// the outcome into the page, and reports failures to its caller as well.
/// Handlers keep no state between calls; concurrent calls are not
/// coordinated.
#[derive(Debug)]
pub struct CatalogPage<C, P> {
    client: C,
    page: P,
}

impl<C, P> CatalogPage<C, P>
where
    C: ClientTrait,
    P: Page,
{
    pub fn new(client: C, page: P) -> Self {
        Self { client, page }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Create a product from the product form.
    ///
    /// On success the form is reset, the confirmation is hidden again after
    /// [`MESSAGE_CLEAR_DELAY`] and the product list is refreshed.
    #[instrument(skip_all)]
    pub async fn create_product(&self) -> Result<(), PageError> {
        let product = NewProduct::from_form(
            &self.page.value(ids::PRODUCT_NAME),
            &self.page.value(ids::PRODUCT_PRICE),
            &self.page.value(ids::PRODUCT_DESCRIPTION),
            &self.page.value(ids::PRODUCT_QUANTITY),
        );

        let response = match self.client.create_product(&product).await {
            Ok(response) => response,
            Err(err) => {
                error!(%err, "create request failed");
                self.show_error(ids::CREATE_MESSAGE, &format!("Error: {err}"));
                return Err(err.into());
            },
        };
        debug!(?response, "create response");

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Failed to create product".to_string());
            error!(%message, "create failed");
            self.show_error(ids::CREATE_MESSAGE, &message);
            return Err(PageError::Rejected(message));
        }

        let message = response
            .message
            .unwrap_or_else(|| "Product created successfully".to_string());
        self.page
            .set_text(ids::CREATE_MESSAGE, &format!("✓ {message}"));
        self.page
            .set_class_name(ids::CREATE_MESSAGE, classes::MESSAGE_SUCCESS);
        self.page.reset_form(ids::PRODUCT_FORM);
        self.page
            .set_class_name_after(ids::CREATE_MESSAGE, classes::MESSAGE, MESSAGE_CLEAR_DELAY);

        // A failed refresh is reported in the list, the product exists either way.
        if let Err(err) = self.get_all_products().await {
            debug!(%err, "refreshing product list after create failed");
        }
        Ok(())
    }

    /// Show the product whose id was entered in the search field.
    #[instrument(skip_all)]
    pub async fn get_product(&self) -> Result<(), PageError> {
        let id = self.page.value(ids::SEARCH_ID);
        if id.is_empty() {
            let err = PageError::MissingProductId;
            self.show_error(ids::SEARCH_MESSAGE, &err.to_string());
            return Err(err);
        }

        let err = match self.client.get_product(&id).await {
            Ok(ApiResponse {
                success: true,
                data: Some(product),
                ..
            }) => {
                self.page
                    .set_inner_html(ids::PRODUCT_DETAILS, &render::product_details(&product));
                self.page.add_class(ids::PRODUCT_DETAILS, classes::SHOW);
                self.page.set_class_name(ids::SEARCH_MESSAGE, classes::MESSAGE);
                return Ok(());
            },
            Ok(ApiResponse { success: true, .. }) => {
                let err = PageError::MissingProduct;
                self.show_error(ids::SEARCH_MESSAGE, &format!("Error: {err}"));
                err
            },
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Failed to fetch product".to_string());
                self.show_error(ids::SEARCH_MESSAGE, &message);
                PageError::Rejected(message)
            },
            Err(err) => {
                self.show_error(ids::SEARCH_MESSAGE, &format!("Error: {err}"));
                err.into()
            },
        };

        warn!(%id, %err, "product lookup failed");
        self.page.remove_class(ids::PRODUCT_DETAILS, classes::SHOW);
        Err(err)
    }

    /// Rebuild the product list.
    ///
    /// On a transport failure the list keeps its previous content.
    #[instrument(skip_all)]
    pub async fn get_all_products(&self) -> Result<(), PageError> {
        let response = match self.client.get_all_products().await {
            Ok(response) => response,
            Err(err) => {
                self.show_error(ids::LIST_MESSAGE, &format!("Error loading products: {err}"));
                return Err(err.into());
            },
        };

        let result = match response {
            ApiResponse {
                success: true,
                data: Some(products),
                ..
            } if !products.is_empty() => {
                self.page.set_inner_html(ids::PRODUCT_LIST, "");
                for product in &products {
                    self.page.append_child(
                        ids::PRODUCT_LIST,
                        classes::PRODUCT_ITEM,
                        &render::product_item(product),
                    );
                }
                debug!(n_products = products.len(), "rendered product list");
                Ok(())
            },
            ApiResponse { success: true, .. } => {
                self.page.set_inner_html(ids::PRODUCT_LIST, render::EMPTY_STATE);
                Ok(())
            },
            ApiResponse { message, .. } => {
                // Rendered like an empty catalog.
                warn!(?message, "product list request was rejected");
                self.page.set_inner_html(ids::PRODUCT_LIST, render::EMPTY_STATE);
                Err(PageError::Rejected(message.unwrap_or_else(|| {
                    "Failed to load products".to_string()
                })))
            },
        };

        self.page.set_class_name(ids::LIST_MESSAGE, classes::MESSAGE);
        result
    }

    /// Delete a product after asking for confirmation.
    ///
    /// Declining is not an error. The outcome is reported through an alert.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), PageError> {
        if !self.page.confirm(DELETE_CONFIRMATION).await {
            debug!("deletion cancelled");
            return Ok(());
        }

        match self.client.delete_product(id).await {
            Ok(response) if response.success => {
                self.page.alert("✓ Product deleted successfully");
                if let Err(err) = self.get_all_products().await {
                    debug!(%err, "refreshing product list after delete failed");
                }
                Ok(())
            },
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Failed to delete product".to_string());
                self.page.alert(&format!("✗ {message}"));
                Err(PageError::Rejected(message))
            },
            Err(err) => {
                self.page.alert(&format!("✗ Error: {err}"));
                Err(err.into())
            },
        }
    }

    fn show_error(&self, id: &str, message: &str) {
        self.page.set_text(id, &format!("✗ {message}"));
        self.page.set_class_name(id, classes::MESSAGE_ERROR);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shop_catalog::{CatalogClientError, MockClient, Product, RecordedRequest};

    use super::*;
    use crate::document::Document;

    fn catalog_page() -> CatalogPage<MockClient, Document> {
        CatalogPage::new(MockClient::new(), Document::catalog())
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: Some(id),
            product_code: shop_catalog::product_code_from_name(name),
            product_name: name.to_string(),
            price: 9.99,
            description: None,
            quantity: 1,
            active: Some(true),
        }
    }

    fn fill_form(document: &Document) {
        document.set_value(ids::PRODUCT_NAME, "Wireless Mouse");
        document.set_value(ids::PRODUCT_PRICE, "19.99");
        document.set_value(ids::PRODUCT_DESCRIPTION, "2.4GHz");
        document.set_value(ids::PRODUCT_QUANTITY, "10");
    }

    // region: create

    #[tokio::test]
    async fn create_success_resets_form_and_clears_message_later() {
        let catalog = catalog_page();
        let document = catalog.page();
        fill_form(document);
        catalog.client().push_product_response(
            ApiResponse::success(product(1, "Wireless Mouse"))
                .with_message("Product created successfully"),
        );
        catalog
            .client()
            .push_products_response(ApiResponse::success(vec![product(1, "Wireless Mouse")]));

        catalog.create_product().await.unwrap();

        assert_eq!(catalog.client().requests(), vec![
            RecordedRequest::Create(NewProduct {
                product_code: "WIRELESS-MOUSE".to_string(),
                product_name: "Wireless Mouse".to_string(),
                price: Some(19.99),
                description: "2.4GHz".to_string(),
                quantity: Some(10),
                active: true,
            }),
            RecordedRequest::GetAll,
        ]);
        assert_eq!(
            document.text(ids::CREATE_MESSAGE),
            "✓ Product created successfully"
        );
        assert_eq!(document.class_name(ids::CREATE_MESSAGE), "message success");
        for field in [
            ids::PRODUCT_NAME,
            ids::PRODUCT_PRICE,
            ids::PRODUCT_DESCRIPTION,
            ids::PRODUCT_QUANTITY,
        ] {
            assert_eq!(document.value(field), "", "{field} was not reset");
        }
        assert!(document.html(ids::PRODUCT_LIST).contains("deleteProduct(1)"));

        document.advance(Duration::from_millis(2999));
        assert_eq!(document.class_name(ids::CREATE_MESSAGE), "message success");
        document.advance(Duration::from_millis(1));
        assert_eq!(document.class_name(ids::CREATE_MESSAGE), "message");
    }

    #[tokio::test]
    async fn create_success_without_message_uses_default() {
        let catalog = catalog_page();
        catalog
            .client()
            .push_product_response(ApiResponse::success(product(1, "Pen")));
        catalog
            .client()
            .push_products_response(ApiResponse::success(vec![]));

        catalog.create_product().await.unwrap();

        assert_eq!(
            catalog.page().text(ids::CREATE_MESSAGE),
            "✓ Product created successfully"
        );
    }

    #[tokio::test]
    async fn create_rejection_shows_server_message() {
        let catalog = catalog_page();
        fill_form(catalog.page());
        catalog
            .client()
            .push_product_response(ApiResponse::failure("Price must be greater than 0"));

        let result = catalog.create_product().await;

        assert!(matches!(result, Err(PageError::Rejected(_))));
        assert_eq!(
            catalog.page().text(ids::CREATE_MESSAGE),
            "✗ Price must be greater than 0"
        );
        assert_eq!(catalog.page().class_name(ids::CREATE_MESSAGE), "message error");
        // form is kept and the list is not refreshed
        assert_eq!(catalog.page().value(ids::PRODUCT_NAME), "Wireless Mouse");
        assert_eq!(catalog.client().requests().len(), 1);
    }

    #[tokio::test]
    async fn create_rejection_without_message_uses_default() {
        let catalog = catalog_page();
        catalog.client().push_product_response(ApiResponse {
            success: false,
            message: None,
            data: None,
            count: None,
        });

        let _ = catalog.create_product().await;

        assert_eq!(
            catalog.page().text(ids::CREATE_MESSAGE),
            "✗ Failed to create product"
        );
    }

    #[tokio::test]
    async fn create_non_json_response_shows_body_prefix() {
        let body = format!("<!DOCTYPE html><html><body>{}</body></html>", "e".repeat(150));
        let catalog = catalog_page();
        fill_form(catalog.page());
        catalog.client().push_error(CatalogClientError::non_json(&body));

        let result = catalog.create_product().await;

        assert!(matches!(
            result,
            Err(PageError::Client(CatalogClientError::NonJsonResponse { .. }))
        ));
        let text = catalog.page().text(ids::CREATE_MESSAGE);
        let prefix: String = body.chars().take(100).collect();
        assert!(text.starts_with("✗ Error:"), "unexpected message: {text}");
        assert!(text.contains(&prefix), "unexpected message: {text}");
        assert!(!text.contains(&body), "message should be truncated: {text}");
        assert_eq!(catalog.page().class_name(ids::CREATE_MESSAGE), "message error");
    }

    // endregion

    // region: get

    #[tokio::test]
    async fn get_product_without_id_issues_no_request() {
        let catalog = catalog_page();

        let result = catalog.get_product().await;

        assert!(matches!(result, Err(PageError::MissingProductId)));
        assert!(catalog.client().requests().is_empty());
        assert_eq!(
            catalog.page().text(ids::SEARCH_MESSAGE),
            "✗ Please enter a Product ID"
        );
        assert_eq!(catalog.page().class_name(ids::SEARCH_MESSAGE), "message error");
    }

    #[tokio::test]
    async fn get_product_renders_details() {
        let catalog = catalog_page();
        catalog.page().set_value(ids::SEARCH_ID, "5");
        catalog.page().set_class_name(ids::SEARCH_MESSAGE, "message error");
        catalog
            .client()
            .push_product_response(ApiResponse::success(product(5, "Desk Lamp")));

        catalog.get_product().await.unwrap();

        assert_eq!(catalog.client().requests(), vec![RecordedRequest::Get(
            "5".to_string()
        )]);
        let details = catalog.page().element(ids::PRODUCT_DETAILS).unwrap();
        assert!(details.has_class("show"));
        assert!(details.inner_html.contains("<h3>Desk Lamp</h3>"));
        assert!(details.inner_html.contains("$9.99"));
        assert_eq!(catalog.page().class_name(ids::SEARCH_MESSAGE), "message");
    }

    #[tokio::test]
    async fn get_product_passes_non_numeric_id_through() {
        let catalog = catalog_page();
        catalog.page().set_value(ids::SEARCH_ID, "abc");
        catalog
            .client()
            .push_product_response(ApiResponse::failure("Invalid id"));

        let _ = catalog.get_product().await;

        assert_eq!(catalog.client().requests(), vec![RecordedRequest::Get(
            "abc".to_string()
        )]);
    }

    #[tokio::test]
    async fn get_product_rejection_hides_details() {
        let catalog = catalog_page();
        catalog.page().set_value(ids::SEARCH_ID, "42");
        catalog.page().add_class(ids::PRODUCT_DETAILS, "show");
        catalog
            .client()
            .push_product_response(ApiResponse::failure("Product not found with id: 42"));

        let result = catalog.get_product().await;

        assert!(matches!(result, Err(PageError::Rejected(_))));
        assert_eq!(
            catalog.page().text(ids::SEARCH_MESSAGE),
            "✗ Product not found with id: 42"
        );
        assert!(
            !catalog
                .page()
                .element(ids::PRODUCT_DETAILS)
                .unwrap()
                .has_class("show")
        );
    }

    #[tokio::test]
    async fn get_product_transport_error_hides_details() {
        let catalog = catalog_page();
        catalog.page().set_value(ids::SEARCH_ID, "1");
        catalog.page().add_class(ids::PRODUCT_DETAILS, "show");
        catalog
            .client()
            .push_error(CatalogClientError::Other("connection refused".to_string()));

        let result = catalog.get_product().await;

        assert!(matches!(result, Err(PageError::Client(_))));
        assert_eq!(
            catalog.page().text(ids::SEARCH_MESSAGE),
            "✗ Error: connection refused"
        );
        assert_eq!(
            catalog.page().class_name(ids::PRODUCT_DETAILS),
            "product-details"
        );
    }

    #[tokio::test]
    async fn get_product_success_without_product_is_an_error() {
        let catalog = catalog_page();
        catalog.page().set_value(ids::SEARCH_ID, "1");
        catalog.client().push_product_response(ApiResponse {
            success: true,
            message: None,
            data: None,
            count: None,
        });

        let result = catalog.get_product().await;

        assert!(matches!(result, Err(PageError::MissingProduct)));
        assert_eq!(
            catalog.page().text(ids::SEARCH_MESSAGE),
            "✗ Error: response contained no product"
        );
    }

    // endregion

    // region: list

    #[tokio::test]
    async fn empty_list_renders_placeholder() {
        let catalog = catalog_page();
        catalog
            .client()
            .push_products_response(ApiResponse::success(vec![]));

        catalog.get_all_products().await.unwrap();

        assert_eq!(catalog.page().html(ids::PRODUCT_LIST), render::EMPTY_STATE);
        assert_eq!(catalog.page().class_name(ids::LIST_MESSAGE), "message");
    }

    #[tokio::test]
    async fn absent_list_renders_placeholder() {
        let catalog = catalog_page();
        catalog.client().push_products_response(ApiResponse {
            success: true,
            message: None,
            data: None,
            count: None,
        });

        catalog.get_all_products().await.unwrap();

        assert_eq!(catalog.page().html(ids::PRODUCT_LIST), render::EMPTY_STATE);
    }

    #[tokio::test]
    async fn list_is_rebuilt_with_one_card_per_product() {
        let catalog = catalog_page();
        catalog
            .page()
            .set_inner_html(ids::PRODUCT_LIST, "<p>stale</p>");
        catalog.client().push_products_response(ApiResponse::success(vec![
            product(1, "Pen"),
            product(2, "Desk Lamp"),
        ]));

        catalog.get_all_products().await.unwrap();

        let list = catalog.page().element(ids::PRODUCT_LIST).unwrap();
        assert_eq!(list.inner_html, "");
        assert_eq!(list.children.len(), 2);
        assert!(list.children.iter().all(|c| c.class_name == "product-item"));
        assert!(list.children[0].inner_html.contains("deleteProduct(1)"));
        assert!(list.children[1].inner_html.contains("deleteProduct(2)"));
    }

    #[tokio::test]
    async fn list_error_keeps_previous_content() {
        let catalog = catalog_page();
        catalog
            .page()
            .append_child(ids::PRODUCT_LIST, "product-item", "<h3>Pen</h3>");
        let before = catalog.page().html(ids::PRODUCT_LIST);
        catalog
            .client()
            .push_error(CatalogClientError::Other("connection refused".to_string()));

        let result = catalog.get_all_products().await;

        assert!(result.is_err());
        assert_eq!(catalog.page().html(ids::PRODUCT_LIST), before);
        assert_eq!(
            catalog.page().text(ids::LIST_MESSAGE),
            "✗ Error loading products: connection refused"
        );
        assert_eq!(catalog.page().class_name(ids::LIST_MESSAGE), "message error");
    }

    #[tokio::test]
    async fn list_rejection_renders_placeholder() {
        let catalog = catalog_page();
        catalog
            .client()
            .push_products_response(ApiResponse::failure("database unavailable"));

        let result = catalog.get_all_products().await;

        assert!(matches!(result, Err(PageError::Rejected(_))));
        assert_eq!(catalog.page().html(ids::PRODUCT_LIST), render::EMPTY_STATE);
        assert_eq!(catalog.page().class_name(ids::LIST_MESSAGE), "message");
    }

    // endregion

    // region: delete

    #[tokio::test]
    async fn declined_delete_issues_no_request() {
        let catalog = catalog_page();
        catalog.page().answer_confirm(false);

        catalog.delete_product(3).await.unwrap();

        assert!(catalog.client().requests().is_empty());
        assert_eq!(catalog.page().prompts(), vec![DELETE_CONFIRMATION]);
        assert!(catalog.page().alerts().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_alerts_and_refreshes() {
        let catalog = catalog_page();
        catalog.client().push_empty_response(
            ApiResponse::<()> {
                success: true,
                message: None,
                data: None,
                count: None,
            }
            .with_message("Product deleted successfully"),
        );
        catalog
            .client()
            .push_products_response(ApiResponse::success(vec![]));

        catalog.delete_product(3).await.unwrap();

        assert_eq!(catalog.client().requests(), vec![
            RecordedRequest::Delete(3),
            RecordedRequest::GetAll
        ]);
        assert_eq!(catalog.page().alerts(), vec!["✓ Product deleted successfully"]);
        assert_eq!(catalog.page().html(ids::PRODUCT_LIST), render::EMPTY_STATE);
    }

    #[tokio::test]
    async fn rejected_delete_alerts_server_message() {
        let catalog = catalog_page();
        catalog
            .client()
            .push_empty_response(ApiResponse::failure("Product not found with id: 3"));

        let result = catalog.delete_product(3).await;

        assert!(matches!(result, Err(PageError::Rejected(_))));
        assert_eq!(catalog.page().alerts(), vec!["✗ Product not found with id: 3"]);
        assert_eq!(catalog.client().requests(), vec![RecordedRequest::Delete(3)]);
    }

    #[tokio::test]
    async fn failed_delete_alerts_error() {
        let catalog = catalog_page();
        catalog
            .client()
            .push_error(CatalogClientError::Other("connection reset".to_string()));

        let result = catalog.delete_product(3).await;

        assert!(matches!(result, Err(PageError::Client(_))));
        assert_eq!(catalog.page().alerts(), vec!["✗ Error: connection reset"]);
    }

    // endregion
}
