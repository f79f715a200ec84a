//! Interactive checkout ending in a WhatsApp hand-off.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};
use serde_json::json;
use trtech_auth::Registration;
use trtech_commerce::catalog::{Product, ProductFilter};
use trtech_commerce::checkout::{line_summary, render_order_message, CheckoutStep, DeliveryField};
use trtech_commerce::customer::PostalAddress;
use trtech_storefront::{CheckoutSession, OrderReceipt, Storefront, StorefrontError};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront(args.open)?;

    let client = ctx.api_client()?;
    let spinner = ctx.output.spinner("Fetching products...");
    let products = client.list_products(&ProductFilter::default()).await;
    spinner.finish_and_clear();
    let products = products.context("Failed to fetch products")?;

    if args.add.is_empty() {
        pick_products(&store, &products)?;
    } else {
        add_by_id(&store, &products, &args.add)?;
    }
    show_cart(&store, ctx);

    let mut session = match store.open_checkout().await {
        Ok(session) => session,
        // The empty-cart notice has already been shown.
        Err(err) if err.is_validation() => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    if session.step() == CheckoutStep::Auth {
        authenticate(&mut session, ctx).await?;
    }
    fill_details(&mut session, ctx)?;

    show_progress(&session, ctx);
    ctx.output.info("");
    let summary = render_order_message(
        &store.cart().items(),
        store.cart().total_price(),
        session.details(),
    );
    for line in summary.lines() {
        ctx.output.info(line);
    }
    ctx.output.info("");

    let confirmed = Confirm::new()
        .with_prompt("Place this order?")
        .default(true)
        .interact()?;
    if !confirmed {
        ctx.output.warn("Cancelled");
        return Ok(());
    }

    let receipt = submit(&mut session, ctx).await?;
    if let Some(receipt) = receipt {
        if ctx.output.is_json() {
            ctx.output.json(&json!({
                "order": receipt.order,
                "handoff_url": receipt.handoff_url,
            }));
        } else {
            ctx.output.kv("Order", &receipt.order.reference());
            ctx.output.kv("Total", &receipt.order.amount().display());
        }
    }
    Ok(())
}

fn product_label(product: &Product) -> String {
    format!(
        "{} ({}) - {}",
        product.name,
        product.condition.as_str(),
        product.price.display()
    )
}

fn add_by_id(store: &Storefront, products: &[Product], ids: &[String]) -> Result<()> {
    for id in ids {
        let Some(product) = products.iter().find(|p| p.id.as_str() == id.as_str()) else {
            bail!("Unknown product: {id}");
        };
        if !product.in_stock {
            bail!("{} is out of stock", product.name);
        }
        store.cart().add_to_cart(product);
    }
    Ok(())
}

fn pick_products(store: &Storefront, products: &[Product]) -> Result<()> {
    let available: Vec<&Product> = products.iter().filter(|p| p.in_stock).collect();
    if available.is_empty() {
        bail!("No products are in stock");
    }

    let labels: Vec<String> = available.iter().map(|p| product_label(p)).collect();
    let chosen = MultiSelect::new()
        .with_prompt("Select products (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()?;

    for index in chosen {
        let product = available[index];
        let quantity: i64 = Input::new()
            .with_prompt(format!("Quantity of {}", product.name))
            .default(1)
            .interact_text()?;
        if quantity < 1 {
            continue;
        }
        store.cart().add_to_cart(product);
        if quantity > 1 {
            store.cart().update_quantity(&product.id, quantity);
        }
    }
    Ok(())
}

fn show_cart(store: &Storefront, ctx: &Context) {
    let cart = store.cart();
    if cart.is_empty() {
        return;
    }
    ctx.output
        .header(&format!("Cart ({} items)", cart.total_items()));
    for item in cart.items() {
        ctx.output.list_item(&line_summary(&item));
    }
    ctx.output.kv("Total", &cart.total_price().display());
}

fn show_progress(session: &CheckoutSession, ctx: &Context) {
    let markers = session.progress();
    if let Some(current) = markers.iter().find(|m| m.current) {
        ctx.output
            .step(current.number as usize, markers.len(), current.label);
    }
}

async fn authenticate(session: &mut CheckoutSession, ctx: &Context) -> Result<()> {
    let choices = ["Sign in", "Create an account", "Continue as guest"];

    while session.step() == CheckoutStep::Auth {
        show_progress(session, ctx);
        let choice = Select::new()
            .with_prompt("How would you like to check out?")
            .items(&choices)
            .default(2)
            .interact()?;

        let outcome = match choice {
            0 => {
                let email: String = Input::new().with_prompt("Email").interact_text()?;
                let password = Password::new().with_prompt("Password").interact()?;
                session.login(email.trim(), &password).await
            }
            1 => {
                let registration = prompt_registration()?;
                session.register(registration).await
            }
            _ => session.continue_as_guest(),
        };

        // Failures were already shown as notices; ask again.
        if let Err(err) = outcome {
            ctx.output.debug(&err.to_string());
        }
    }
    Ok(())
}

fn prompt_registration() -> Result<Registration> {
    let text = |label: &str, required: bool| -> Result<String> {
        let value: String = Input::new()
            .with_prompt(label)
            .allow_empty(!required)
            .interact_text()?;
        Ok(value.trim().to_string())
    };

    Ok(Registration {
        first_name: text("First name", true)?,
        last_name: text("Last name", false)?,
        email: text("Email", true)?,
        password: Password::new().with_prompt("Password").interact()?,
        confirm_password: Password::new().with_prompt("Confirm password").interact()?,
        phone: text("Phone", false)?,
        address: PostalAddress {
            street: text("Street address", false)?,
            city: text("City", false)?,
            postal_code: text("Postal code", false)?,
            province: text("Province", false)?,
        },
    })
}

fn fill_details(session: &mut CheckoutSession, ctx: &Context) -> Result<()> {
    while session.step() == CheckoutStep::Details {
        show_progress(session, ctx);
        for field in DeliveryField::ALL {
            let label = if field.is_required() {
                format!("{} *", field.label())
            } else {
                field.label().to_string()
            };
            let value: String = Input::new()
                .with_prompt(label)
                .with_initial_text(session.details().get(field))
                .allow_empty(true)
                .interact_text()?;
            session.set_field(field, value)?;
        }

        match session.continue_to_confirmation() {
            Ok(_) => {}
            Err(err) if err.is_validation() => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Place the order, offering to retry when only the hand-off failed.
async fn submit(session: &mut CheckoutSession, ctx: &Context) -> Result<Option<OrderReceipt>> {
    loop {
        match session.place_order().await {
            Ok(receipt) => return Ok(Some(receipt)),
            Err(StorefrontError::Handoff(_)) => {
                let again = Confirm::new()
                    .with_prompt("Try opening WhatsApp again?")
                    .default(true)
                    .interact()?;
                if !again {
                    if let Some(pending) = session.pending_handoff() {
                        ctx.output.info("Send this link yourself to finish the order:");
                        ctx.output.info(&pending.url);
                    }
                    return Ok(None);
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}
