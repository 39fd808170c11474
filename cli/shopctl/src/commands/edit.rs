use anyhow::{Context, Result};
use bpaf::Bpaf;
use shop_catalog::{ClientTrait, NewProduct, Product, ProductId};
use tracing::{debug, instrument};

use super::show::render_product;
use crate::utils::message;

#[derive(Debug, Bpaf, Clone)]
pub struct ProductFields {
    /// Product name, the product code is derived from it
    #[bpaf(long, short, argument("NAME"))]
    name: String,

    /// Unit price
    #[bpaf(long, short, argument("PRICE"))]
    price: f64,

    /// Units in stock
    #[bpaf(long, argument("QUANTITY"))]
    quantity: i64,

    /// Free text description
    #[bpaf(long, short, argument("TEXT"))]
    description: Option<String>,
}

impl ProductFields {
    fn into_new_product(self) -> NewProduct {
        NewProduct::new(
            &self.name,
            self.price,
            self.description.as_deref().unwrap_or_default(),
            self.quantity,
        )
    }
}

fn describe(product: &Product) -> String {
    match product.id {
        Some(id) => format!("'{}' (id {id})", product.product_name),
        None => format!("'{}'", product.product_name),
    }
}

#[derive(Debug, Bpaf, Clone)]
pub struct Create {
    #[bpaf(external(product_fields))]
    fields: ProductFields,
}

impl Create {
    #[instrument(name = "create", skip_all)]
    pub async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        let product = self.fields.into_new_product();
        debug!(code = %product.product_code, "creating product");

        let created = client
            .create_product(&product)
            .await
            .context("Could not create product")?
            .into_result()?;

        match created {
            Some(created) => {
                message::created(format!("Created product {}", describe(&created)));
                println!("{}", render_product(&created));
            },
            None => message::created(format!("Created product '{}'", product.product_name)),
        }
        Ok(())
    }
}

#[derive(Debug, Bpaf, Clone)]
pub struct Update {
    /// Mark the product as inactive
    #[bpaf(long)]
    inactive: bool,

    #[bpaf(external(product_fields))]
    fields: ProductFields,

    #[bpaf(positional("ID"))]
    id: ProductId,
}

impl Update {
    #[instrument(name = "update", skip_all, fields(id = self.id))]
    pub async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        let mut product = self.fields.into_new_product();
        product.active = !self.inactive;

        let updated = client
            .update_product(self.id, &product)
            .await
            .context("Could not update product")?
            .into_result()?;

        message::updated(format!("Updated product {}", self.id));
        if let Some(updated) = updated {
            println!("{}", render_product(&updated));
        }
        Ok(())
    }
}

#[derive(Debug, Bpaf, Clone)]
pub struct Deactivate {
    #[bpaf(positional("ID"))]
    id: ProductId,
}

impl Deactivate {
    #[instrument(name = "deactivate", skip_all, fields(id = self.id))]
    pub async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        client
            .deactivate_product(self.id)
            .await
            .context("Could not deactivate product")?
            .into_result()?;
        message::updated(format!("Deactivated product {}", self.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shop_catalog::{ApiResponse, MockClient, RecordedRequest};

    use super::*;
    use crate::utils::message::history::History;

    fn fields() -> ProductFields {
        ProductFields {
            name: "Wireless Mouse".to_string(),
            price: 19.99,
            quantity: 10,
            description: None,
        }
    }

    fn created(id: ProductId) -> Product {
        Product {
            id: Some(id),
            product_code: "WIRELESS-MOUSE".to_string(),
            product_name: "Wireless Mouse".to_string(),
            price: 19.99,
            description: None,
            quantity: 10,
            active: Some(true),
        }
    }

    #[tokio::test]
    async fn create_derives_code_and_reports() {
        History::global().clear();
        let client = MockClient::new();
        client.push_product_response(ApiResponse::success(created(4)));

        Create { fields: fields() }.handle(&client).await.unwrap();

        assert_eq!(client.requests(), vec![RecordedRequest::Create(NewProduct {
            product_code: "WIRELESS-MOUSE".to_string(),
            product_name: "Wireless Mouse".to_string(),
            price: Some(19.99),
            description: String::new(),
            quantity: Some(10),
            active: true,
        })]);
        assert_eq!(&History::global().messages(), &[
            "✨ Created product 'Wireless Mouse' (id 4)"
        ]);
    }

    #[tokio::test]
    async fn rejected_create_is_an_error() {
        let client = MockClient::new();
        client.push_product_response(ApiResponse::failure("Product code already exists"));

        let err = Create { fields: fields() }.handle(&client).await.unwrap_err();

        assert_eq!(err.to_string(), "Product code already exists");
    }

    #[tokio::test]
    async fn update_can_deactivate() {
        let client = MockClient::new();
        client.push_product_response(ApiResponse::success(created(4)));

        Update {
            inactive: true,
            fields: fields(),
            id: 4,
        }
        .handle(&client)
        .await
        .unwrap();

        let requests = client.requests();
        let [RecordedRequest::Update(4, product)] = requests.as_slice() else {
            panic!("unexpected requests: {requests:?}");
        };
        assert!(!product.active);
    }

    #[tokio::test]
    async fn deactivate_reports() {
        History::global().clear();
        let client = MockClient::new();
        client.push_product_response(ApiResponse::success(created(4)));

        Deactivate { id: 4 }.handle(&client).await.unwrap();

        assert_eq!(client.requests(), vec![RecordedRequest::Deactivate(4)]);
        assert_eq!(&History::global().messages(), &["✅ Deactivated product 4"]);
    }
}
