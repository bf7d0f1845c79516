//! CLI command implementations.

pub mod config;
pub mod orders;
pub mod products;

use clap::{ArgAction, Args, Subcommand};
use tienda_commerce::catalog::ProductPatch;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,

    /// Product file (default: catalog.products_file from the config).
    #[arg(short, long, global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products.
    List {
        /// Read the catalog from the backend instead of the file.
        #[arg(long)]
        remote: bool,
    },
    /// Add a product.
    Add(ProductFields),
    /// Update fields of a product.
    Update {
        /// Product id.
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product.
    Delete {
        /// Product id.
        #[arg(long)]
        id: Option<String>,
    },
}

/// Product fields settable from flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub nombre: Option<String>,

    #[arg(long)]
    pub precio: Option<f64>,

    #[arg(long)]
    pub imagen: Option<String>,

    #[arg(long)]
    pub descripcion: Option<String>,

    #[arg(long)]
    pub categoria: Option<String>,

    /// On sale; `--oferta` alone means true.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
    pub oferta: Option<bool>,

    #[arg(long)]
    pub stock: Option<i64>,
}

impl ProductFields {
    /// The fields that were given, as a patch.
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            nombre: self.nombre,
            precio: self.precio,
            imagen: self.imagen.filter(|i| !i.is_empty()),
            descripcion: self.descripcion,
            categoria: self.categoria,
            oferta: self.oferta,
            stock: self.stock,
        }
    }
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List stored orders.
    List {
        /// Only orders placed by this email.
        #[arg(long)]
        email: Option<String>,
    },
    /// Show one receipt.
    Show {
        /// Order id or display id.
        id: String,
    },
    /// Delete the stored order history.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
