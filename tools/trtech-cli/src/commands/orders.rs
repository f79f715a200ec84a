//! Order back-office commands.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use trtech_api::{OrderFilter, OrderStats};
use trtech_commerce::checkout::{Order, OrderStatus, PaymentMethod};
use trtech_commerce::ids::OrderId;

use super::{selected, OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{format_date, status_badge};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrdersCommand::List {
            status,
            payment,
            search,
        } => {
            let mut filter = OrderFilter::new();
            filter.status = selected(&status, OrderStatus::parse)?;
            filter.payment_method = selected(&payment, PaymentMethod::parse)?;
            if let Some(search) = search {
                filter = filter.with_search(&search);
            }
            list_orders(&filter, ctx).await
        }
        OrdersCommand::Stats => show_stats(ctx).await,
        OrdersCommand::Show { id } => show_order(&OrderId::new(id), ctx).await,
        OrdersCommand::Status { id, status } => {
            let status = OrderStatus::parse(&status)?;
            update_status(&OrderId::new(id), status, ctx).await
        }
        OrdersCommand::Delete { id, yes } => delete_order(&OrderId::new(id), yes, ctx).await,
    }
}

async fn fetch_orders(status: Option<OrderStatus>, ctx: &Context) -> Result<Vec<Order>> {
    let client = ctx.api_client()?;
    let spinner = ctx.output.spinner("Fetching orders...");
    let orders = client.list_orders(status).await;
    spinner.finish_and_clear();
    orders.context("Failed to fetch orders")
}

async fn list_orders(filter: &OrderFilter, ctx: &Context) -> Result<()> {
    // The backend filters by status itself; the rest happens here.
    let orders = fetch_orders(filter.status, ctx).await?;
    let shown = filter.apply(&orders);

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output
        .header(&format!("Orders ({} of {})", shown.len(), orders.len()));
    if shown.is_empty() {
        ctx.output.info("No orders found");
        return Ok(());
    }

    let widths = [9, 22, 26, 11, 10, 12, 16];
    ctx.output.table_header(
        &["ORDER", "CUSTOMER", "EMAIL", "TOTAL", "PAYMENT", "STATUS", "DATE"],
        &widths,
    );
    for order in shown {
        let reference = order.reference();
        let total = order.amount().display();
        let payment = order
            .payment_method
            .map(|m| m.as_str())
            .unwrap_or("-");
        let date = format_date(order.created_at.as_ref());
        ctx.output.table_row(
            &[
                &reference,
                order.customer_name(),
                order.customer_email(),
                &total,
                payment,
                order.status.as_str(),
                &date,
            ],
            &widths,
        );
    }

    Ok(())
}

async fn show_stats(ctx: &Context) -> Result<()> {
    let orders = fetch_orders(None, ctx).await?;
    let stats = OrderStats::from_orders(&orders);

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Order summary");
    ctx.output.kv("Total", &stats.total.to_string());
    ctx.output.kv("Pending", &stats.pending.to_string());
    ctx.output.kv("Processing", &stats.processing.to_string());
    ctx.output.kv("Shipped", &stats.shipped.to_string());
    ctx.output.kv("Delivered", &stats.delivered.to_string());
    ctx.output.kv("Revenue", &stats.total_revenue.display());
    Ok(())
}

async fn show_order(id: &OrderId, ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;
    let order = client
        .get_order(id)
        .await
        .with_context(|| format!("Failed to fetch order {id}"))?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order.reference()));
    ctx.output.kv("Customer", order.customer_name());
    ctx.output.kv("Email", order.customer_email());
    ctx.output.kv("Phone", order.customer_phone());
    if let Some(address) = &order.shipping_address {
        ctx.output.kv("Address", address);
    }
    ctx.output.kv("Status", &status_badge(order.status.as_str()));
    ctx.output.kv("Payment", order.payment_status.as_str());
    if let Some(method) = order.payment_method {
        ctx.output.kv("Method", method.as_str());
    }
    ctx.output.kv("Placed", &format_date(order.created_at.as_ref()));

    ctx.output.info("");
    for item in &order.items {
        ctx.output.list_item(&format!(
            "{} ({}) x{} - {}",
            item.product_name,
            item.condition.as_ref().map(|c| c.as_str()).unwrap_or("-"),
            item.quantity,
            item.subtotal().display()
        ));
    }
    ctx.output.kv("Total", &order.amount().display());
    if let Some(notes) = order.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        ctx.output.kv("Notes", notes);
    }

    Ok(())
}

async fn update_status(id: &OrderId, status: OrderStatus, ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;
    let order = client
        .update_order_status(id, status)
        .await
        .context("Failed to update order status")?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
    } else {
        ctx.output.success(&format!(
            "Order status updated: {} is now {}",
            order.reference(),
            status
        ));
    }
    Ok(())
}

async fn delete_order(id: &OrderId, yes: bool, ctx: &Context) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete order {id}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let client = ctx.api_client()?;
    client
        .delete_order(id)
        .await
        .context("Failed to delete order")?;
    ctx.output.success("Order deleted");
    Ok(())
}
