mod delete;
mod edit;
mod show;

use anyhow::{Context, Result};
use bpaf::Bpaf;
use indoc::indoc;
use shop_catalog::{CatalogClient, ClientTrait};

use crate::config::Config;

const SHOPCTL_DESCRIPTION: &str = indoc! {"
    Manage the products of a catalog service.

    The catalog is read from the 'catalog_url' config key, the
    SHOPCTL_CATALOG_URL environment variable or '--catalog-url'.
"};

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Bpaf)]
#[bpaf(options, descr(SHOPCTL_DESCRIPTION))]
pub struct ShopctlCli(#[bpaf(external(shopctl_args))] pub ShopctlArgs);

/// Main shopctl args parser
///
/// To parse the shopctl CLI, use [`ShopctlCli`] instead using [`shopctl_cli()`].
#[derive(Debug, Bpaf)]
#[bpaf(ignore_rustdoc)]
pub struct ShopctlArgs {
    /// Verbose mode
    ///
    /// Invoke multiple times for increasing detail.
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    /// Base URL of the products API
    #[bpaf(long("catalog-url"), argument("URL"))]
    pub catalog_url: Option<String>,

    #[bpaf(external(commands))]
    command: Commands,
}

impl ShopctlArgs {
    pub async fn handle(self, config: Config) -> Result<()> {
        let client = CatalogClient::new(config.client_config())
            .context("Could not create catalog client")?;
        self.command.handle(&client).await
    }
}

#[derive(Debug, Bpaf, Clone)]
enum Commands {
    /// List all products
    #[bpaf(command)]
    List(#[bpaf(external(show::list))] show::List),

    /// List active products
    #[bpaf(command)]
    Active(#[bpaf(external(show::active))] show::Active),

    /// Show a single product
    #[bpaf(command)]
    Get(#[bpaf(external(show::get))] show::Get),

    /// Find products by name
    #[bpaf(command)]
    Search(#[bpaf(external(show::search))] show::Search),

    /// Create a product
    #[bpaf(command, long("add"))]
    Create(#[bpaf(external(edit::create))] edit::Create),

    /// Replace the fields of a product
    #[bpaf(command)]
    Update(#[bpaf(external(edit::update))] edit::Update),

    /// Mark a product as inactive
    #[bpaf(command)]
    Deactivate(#[bpaf(external(edit::deactivate))] edit::Deactivate),

    /// Delete a product
    #[bpaf(command, long("remove"))]
    Delete(#[bpaf(external(delete::delete))] delete::Delete),
}

impl Commands {
    async fn handle(self, client: &impl ClientTrait) -> Result<()> {
        match self {
            Commands::List(args) => args.handle(client).await,
            Commands::Active(args) => args.handle(client).await,
            Commands::Get(args) => args.handle(client).await,
            Commands::Search(args) => args.handle(client).await,
            Commands::Create(args) => args.handle(client).await,
            Commands::Update(args) => args.handle(client).await,
            Commands::Deactivate(args) => args.handle(client).await,
            Commands::Delete(args) => args.handle(client).await,
        }
    }
}
