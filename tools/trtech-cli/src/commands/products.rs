//! Catalogue commands.

use std::path::Path;

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use trtech_commerce::catalog::{Product, ProductFilter};
use trtech_commerce::ids::{ProductId, ServiceId};

use super::{ProductsArgs, ProductsCommand, ServicesArgs};
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        None | Some(ProductsCommand::List) => {
            let mut filter = ProductFilter::from_selection(&args.category, &args.condition);
            if let Some(search) = &args.search {
                filter = filter.with_search(search.as_str());
            }
            list_products(&filter, ctx).await
        }
        Some(ProductsCommand::Show { id }) => show_product(&ProductId::new(id), ctx).await,
        Some(ProductsCommand::Add { file }) => add_product(Path::new(&file), ctx).await,
        Some(ProductsCommand::Update { file }) => update_product(Path::new(&file), ctx).await,
        Some(ProductsCommand::Delete { id, yes }) => {
            delete_product(&ProductId::new(id), yes, ctx).await
        }
    }
}

async fn list_products(filter: &ProductFilter, ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;
    let spinner = ctx.output.spinner("Fetching products...");
    let products = client.list_products(filter).await;
    spinner.finish_and_clear();
    let products = products.context("Failed to fetch products")?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", products.len()));
    if products.is_empty() {
        ctx.output.info("No products match these filters");
        return Ok(());
    }

    let widths = [14, 32, 10, 12, 12];
    ctx.output
        .table_header(&["ID", "NAME", "CONDITION", "CATEGORY", "PRICE"], &widths);
    for product in &products {
        let price = product.price.display();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                product.condition.as_str(),
                &product.category,
                &price,
            ],
            &widths,
        );
    }

    Ok(())
}

async fn show_product(id: &ProductId, ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;
    let product = client
        .get_product(id)
        .await
        .with_context(|| format!("Failed to fetch product {id}"))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.display());
    if let Some(original) = product.original_price {
        ctx.output.kv("Was", &original.display());
    }
    ctx.output.kv("Condition", product.condition.as_str());
    ctx.output.kv("Category", &product.category);
    if let Some(stock) = product.stock {
        ctx.output.kv("Stock", &stock.to_string());
    }
    ctx.output
        .kv("Available", if product.in_stock { "yes" } else { "no" });
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    Ok(())
}

fn read_product(path: &Path) -> Result<Product> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid product JSON in {}", path.display()))
}

async fn add_product(path: &Path, ctx: &Context) -> Result<()> {
    let product = read_product(path)?;
    let client = ctx.api_client()?;
    let created = client
        .create_product(&product)
        .await
        .context("Failed to add product")?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
    } else {
        ctx.output
            .success(&format!("Product added successfully ({})", created.id));
    }
    Ok(())
}

async fn update_product(path: &Path, ctx: &Context) -> Result<()> {
    let product = read_product(path)?;
    let client = ctx.api_client()?;
    let updated = client
        .update_product(&product)
        .await
        .context("Failed to update product")?;

    if ctx.output.is_json() {
        ctx.output.json(&updated);
    } else {
        ctx.output.success("Product updated successfully");
    }
    Ok(())
}

async fn delete_product(id: &ProductId, yes: bool, ctx: &Context) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete product {id}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let client = ctx.api_client()?;
    client
        .delete_product(id)
        .await
        .context("Failed to delete product")?;
    ctx.output.success("Product deleted successfully");
    Ok(())
}

/// Run the services command.
pub async fn run_services(args: ServicesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;

    if let Some(id) = args.id {
        let service = client
            .get_service(&ServiceId::new(id))
            .await
            .context("Failed to fetch service")?;
        if ctx.output.is_json() {
            ctx.output.json(&service);
            return Ok(());
        }
        ctx.output.header(&service.title);
        ctx.output.kv("Price", &service.price);
        if let Some(category) = &service.category {
            ctx.output.kv("Category", category);
        }
        ctx.output.info(&service.description);
        for feature in &service.features {
            ctx.output.list_item(feature);
        }
        return Ok(());
    }

    let spinner = ctx.output.spinner("Fetching services...");
    let services = client.list_services().await;
    spinner.finish_and_clear();
    let services = services.context("Failed to fetch services")?;

    if ctx.output.is_json() {
        ctx.output.json(&services);
        return Ok(());
    }

    ctx.output.header("Services");
    for service in &services {
        ctx.output
            .list_item(&format!("{} - {} ({})", service.title, service.price, service.id));
    }
    Ok(())
}
