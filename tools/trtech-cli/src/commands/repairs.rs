//! Repair booking and repair job commands.

use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Input, Select};
use trtech_api::{RepairFilter, RepairStats};
use trtech_commerce::ids::RepairId;
use trtech_commerce::repair::{DeviceType, RepairBooking, RepairStatus};

use super::{selected, RepairsArgs, RepairsCommand};
use crate::context::Context;
use crate::output::format_date;

/// Run the repairs command.
pub async fn run(args: RepairsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        RepairsCommand::Book { record, open } => book_repair(record, open, ctx).await,
        RepairsCommand::List {
            status,
            device,
            search,
        } => {
            let mut filter = RepairFilter::new();
            filter.status = selected(&status, RepairStatus::parse)?;
            filter.device_type = selected(&device, DeviceType::parse)?;
            if let Some(search) = search {
                filter = filter.with_search(&search);
            }
            list_repairs(&filter, ctx).await
        }
        RepairsCommand::Stats => show_stats(ctx).await,
        RepairsCommand::Status { id, status } => {
            let status = RepairStatus::parse(&status)?;
            let client = ctx.api_client()?;
            client
                .update_repair_status(&RepairId::new(id), status)
                .await
                .context("Failed to update repair status")?;
            ctx.output.success("Repair status updated");
            Ok(())
        }
        RepairsCommand::Delete { id, yes } => {
            if !yes
                && !Confirm::new()
                    .with_prompt(format!("Delete repair {id}?"))
                    .default(false)
                    .interact()?
            {
                ctx.output.warn("Cancelled");
                return Ok(());
            }
            let client = ctx.api_client()?;
            client
                .delete_repair(&RepairId::new(id))
                .await
                .context("Failed to delete repair")?;
            ctx.output.success("Repair deleted");
            Ok(())
        }
    }
}

fn prompt(label: &str, required: bool) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .allow_empty(!required)
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn prompt_booking() -> Result<RepairBooking> {
    let name = prompt("Full name", true)?;
    let email = prompt("Email (optional)", false)?;
    let phone = prompt("Phone", true)?;

    let labels: Vec<&str> = DeviceType::ALL.iter().map(|d| d.as_str()).collect();
    let choice = Select::new()
        .with_prompt("Device type")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(RepairBooking {
        name,
        email,
        phone,
        device_type: DeviceType::ALL.get(choice).copied(),
        brand: prompt("Brand (optional)", false)?,
        model: prompt("Model (optional)", false)?,
        issue: prompt("Describe the issue", true)?,
        additional_info: prompt("Anything else? (optional)", false)?,
    })
}

async fn book_repair(record: bool, open: bool, ctx: &Context) -> Result<()> {
    ctx.output.header("Book a repair");
    let booking = prompt_booking()?;

    if record {
        let client = ctx.api_client()?;
        let repair = client
            .create_repair(&booking)
            .await
            .context("Failed to record repair request")?;
        ctx.output
            .success(&format!("Repair request created successfully ({})", repair.id));
    }

    ctx.storefront(open)?.book_repair(&booking).await?;
    Ok(())
}

async fn list_repairs(filter: &RepairFilter, ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;
    let spinner = ctx.output.spinner("Fetching repairs...");
    let repairs = client.list_repairs(filter.status).await;
    spinner.finish_and_clear();
    let repairs = repairs.context("Failed to fetch repairs")?;
    let shown = filter.apply(&repairs);

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output
        .header(&format!("Repairs ({} of {})", shown.len(), repairs.len()));
    if shown.is_empty() {
        ctx.output.info("No repairs found");
        return Ok(());
    }

    let widths = [12, 20, 16, 22, 12, 16];
    ctx.output.table_header(
        &["ID", "CUSTOMER", "DEVICE", "MODEL", "STATUS", "BOOKED"],
        &widths,
    );
    for repair in shown {
        let model = format!("{} {}", repair.brand, repair.model);
        let date = format_date(repair.created_at.as_ref());
        ctx.output.table_row(
            &[
                repair.id.as_str(),
                &repair.customer_name,
                repair.device_type.as_str(),
                model.trim(),
                repair.status.as_str(),
                &date,
            ],
            &widths,
        );
    }
    Ok(())
}

async fn show_stats(ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;
    let repairs = client
        .list_repairs(None)
        .await
        .context("Failed to fetch repairs")?;
    let stats = RepairStats::from_repairs(&repairs);

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Repair summary");
    ctx.output.kv("Total", &stats.total.to_string());
    ctx.output.kv("Pending", &stats.pending.to_string());
    ctx.output.kv("In progress", &stats.in_progress.to_string());
    ctx.output.kv("Completed", &stats.completed.to_string());
    Ok(())
}
