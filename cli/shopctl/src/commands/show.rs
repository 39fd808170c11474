use anyhow::{Context, Result};
use bpaf::Bpaf;
use indoc::formatdoc;
use shop_catalog::{ClientTrait, Product, ProductId, to_fixed};
use tracing::instrument;

use crate::utils::message;

#[derive(Debug, Bpaf, Clone, Copy)]
pub struct Brief {
    /// Only print id, name and price
    #[bpaf(long, short)]
    brief: bool,
}

#[derive(Debug, Bpaf, Clone)]
pub struct List {
    #[bpaf(external(brief))]
    brief: Brief,
}

impl List {
    #[instrument(name = "list", skip_all)]
    pub async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        let products = client
            .get_all_products()
            .await
            .context("Could not list products")?
            .into_result()?
            .unwrap_or_default();
        print_products(&products, self.brief);
        Ok(())
    }
}

#[derive(Debug, Bpaf, Clone)]
pub struct Active {
    #[bpaf(external(brief))]
    brief: Brief,
}

impl Active {
    #[instrument(name = "active", skip_all)]
    pub async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        let products = client
            .active_products()
            .await
            .context("Could not list active products")?
            .into_result()?
            .unwrap_or_default();
        print_products(&products, self.brief);
        Ok(())
    }
}

#[derive(Debug, Bpaf, Clone)]
pub struct Search {
    #[bpaf(external(brief))]
    brief: Brief,

    /// Name, or part of a name, to look for
    #[bpaf(positional("NAME"))]
    name: String,
}

impl Search {
    #[instrument(name = "search", skip_all, fields(name = %self.name))]
    pub async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        let products = client
            .search_products(&self.name)
            .await
            .context("Could not search products")?
            .into_result()?
            .unwrap_or_default();
        print_products(&products, self.brief);
        Ok(())
    }
}

#[derive(Debug, Bpaf, Clone)]
pub struct Get {
    #[bpaf(positional("ID"))]
    id: ProductId,
}

impl Get {
    #[instrument(name = "get", skip_all, fields(id = self.id))]
    pub async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        let product = client
            .get_product(&self.id.to_string())
            .await
            .context("Could not get product")?
            .into_result()?
            .with_context(|| format!("Product {} was not returned by the catalog", self.id))?;
        println!("{}", render_product(&product));
        Ok(())
    }
}

fn print_products(products: &[Product], brief: Brief) {
    if products.is_empty() {
        message::plain("No products found.");
        return;
    }
    println!("{}", render_products(products, brief));
}

pub(super) fn render_products(products: &[Product], Brief { brief }: Brief) -> String {
    if brief {
        products
            .iter()
            .map(render_brief)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        products
            .iter()
            .map(render_product)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_brief(product: &Product) -> String {
    format!(
        "{id}\t{name}\t${price}",
        id = display_id(product),
        name = product.product_name,
        price = to_fixed(product.price, 2)
    )
}

/// A product as a block of `key: value` lines.
pub(super) fn render_product(product: &Product) -> String {
    let description = product
        .description
        .as_deref()
        .filter(|description| !description.is_empty())
        .unwrap_or("N/A");
    let active = match product.active {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };

    formatdoc! {"
        {name} ({code})
          id:          {id}
          price:       ${price}
          quantity:    {quantity}
          description: {description}
          active:      {active}
        ",
        name = product.product_name,
        code = product.product_code,
        id = display_id(product),
        price = to_fixed(product.price, 2),
        quantity = product.quantity,
        description = description,
        active = active,
    }
}

fn display_id(product: &Product) -> String {
    product
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
