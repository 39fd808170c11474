use anyhow::{Context, Result, bail};
use bpaf::Bpaf;
use shop_catalog::{ClientTrait, ProductId};
use tracing::instrument;

use crate::utils::dialog::{Confirm, Dialog};
use crate::utils::message;

// Delete a product
#[derive(Debug, Bpaf, Clone)]
pub struct Delete {
    /// Delete the product without confirmation.
    #[bpaf(short, long)]
    force: bool,

    #[bpaf(positional("ID"))]
    id: ProductId,
}

impl Delete {
    #[instrument(name = "delete", skip_all, fields(id = self.id))]
    pub async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        let confirm = Dialog {
            message: "Are you sure you want to delete this product?",
            help_message: Some("Use `-f` to force deletion"),
            typed: Confirm {
                default: Some(false),
            },
        };

        if !self.force && Dialog::can_prompt() && !confirm.prompt().await? {
            bail!("Product deletion cancelled");
        }

        client
            .delete_product(self.id)
            .await
            .context("Could not delete product")?
            .into_result()?;

        message::deleted(format!("Product {} deleted", self.id));
        Ok(())
    }
}
