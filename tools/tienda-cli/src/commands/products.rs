//! Product catalog commands.

use anyhow::{bail, Result};
use chrono::Utc;
use tienda_client::{ApiClient, CatalogService};
use tienda_commerce::catalog::{Product, ProductPatch, ProductRepository};
use tienda_commerce::ids::current_timestamp_millis;
use tienda_commerce::ProductId;

use super::{ProductFields, ProductsArgs, ProductsCommand};
use crate::catalog_file::CatalogFile;
use crate::context::Context;
use crate::output::truncate;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let file = CatalogFile::new(ctx.products_file(args.file.as_deref()));

    match args.command {
        ProductsCommand::List { remote: false } => list(&file.load()?, ctx),
        ProductsCommand::List { remote: true } => list_remote(ctx).await,
        ProductsCommand::Add(fields) => {
            let mut products = file.load()?;
            let id = add_product(&mut products, fields, new_product_id());
            file.save(&products)?;
            ctx.output.success(&format!("Producto creado: {id}"));
            Ok(())
        }
        ProductsCommand::Update { id, fields } => {
            let Some(id) = id else {
                bail!("Falta --id");
            };
            let mut products = file.load()?;
            update_product(&mut products, &id, &fields.into_patch())?;
            file.save(&products)?;
            ctx.output.success(&format!("Producto actualizado: {id}"));
            Ok(())
        }
        ProductsCommand::Delete { id } => {
            let Some(id) = id else {
                bail!("Falta --id");
            };
            let mut products = file.load()?;
            let removed = delete_products(&mut products, &id);
            file.save(&products)?;
            ctx.output.success(&format!("Eliminados {removed} productos."));
            Ok(())
        }
    }
}

fn new_product_id() -> ProductId {
    ProductId::new(format!("p{}", current_timestamp_millis()))
}

/// Append a product built from `fields`. Unnamed products are called
/// "Sin nombre"; the creation time is stamped now.
pub fn add_product(products: &mut Vec<Product>, fields: ProductFields, id: ProductId) -> ProductId {
    let mut product = Product::new(id.clone(), "Sin nombre", 0.0);
    fields.into_patch().apply_to(&mut product);
    product.created_at = Some(Utc::now().to_rfc3339());
    products.push(product);
    id
}

pub fn update_product(products: &mut [Product], id: &str, patch: &ProductPatch) -> Result<()> {
    let Some(product) = products.iter_mut().find(|p| p.id.as_str() == id) else {
        bail!("Producto no encontrado: {id}");
    };
    patch.apply_to(product);
    Ok(())
}

/// Remove every product with `id`; returns how many went.
pub fn delete_products(products: &mut Vec<Product>, id: &str) -> usize {
    let before = products.len();
    products.retain(|p| p.id.as_str() != id);
    before - products.len()
}

fn list(products: &[Product], ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }
    if products.is_empty() {
        ctx.output.info("No hay productos.");
        return Ok(());
    }

    let widths = [16, 28, 10, 7, 6];
    ctx.output
        .table_header(&["id", "nombre", "precio", "oferta", "stock"], &widths);
    for product in products {
        let nombre = truncate(&product.nombre, widths[1]);
        let precio = format!("{:.2}", product.precio);
        let oferta = if product.oferta { "sí" } else { "no" };
        let stock = product.stock.to_string();
        ctx.output.table_row(
            &[product.id.as_str(), &nombre, &precio, oferta, &stock],
            &widths,
        );
    }
    Ok(())
}

async fn list_remote(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let client = ApiClient::new(ctx.config.api.clone())?.with_token_store(store.clone());
    ctx.output
        .debug(&format!("Consultando {}", ctx.config.api.url("/products")));

    let service = CatalogService::new(client, ProductRepository::new(store));
    let products = service.products().await?;
    list(&products, ctx)
}
