//! Contact form commands.

use anyhow::{Context as _, Result};
use trtech_commerce::contact::ContactForm;

use super::{ContactArgs, ContactCommand};
use crate::context::Context;
use crate::output::format_date;

/// Run the contact command.
pub async fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ContactCommand::Send {
            name,
            email,
            phone,
            subject,
            message,
            record,
            open,
        } => {
            let form = ContactForm {
                name,
                email,
                phone,
                subject,
                message,
            };
            send(&form, record, open, ctx).await
        }
        ContactCommand::List => list(ctx).await,
    }
}

async fn send(form: &ContactForm, record: bool, open: bool, ctx: &Context) -> Result<()> {
    let store = ctx.storefront(open)?;

    if record {
        form.validate()?;
        ctx.api_client()?
            .submit_contact(form)
            .await
            .context("Failed to send message to the backend")?;
        ctx.output.success("Message recorded");
    }

    store.send_contact(form).await?;
    Ok(())
}

async fn list(ctx: &Context) -> Result<()> {
    let client = ctx.api_client()?;
    let spinner = ctx.output.spinner("Fetching messages...");
    let messages = client.list_contact_messages().await;
    spinner.finish_and_clear();
    let messages = messages.context("Failed to fetch contact messages")?;

    if ctx.output.is_json() {
        ctx.output.json(&messages);
        return Ok(());
    }

    ctx.output.header(&format!("Messages ({})", messages.len()));
    for message in &messages {
        ctx.output.info("");
        let subject = if message.form.subject.trim().is_empty() {
            "(no subject)"
        } else {
            message.form.subject.as_str()
        };
        ctx.output.kv("From", &message.form.name);
        ctx.output.kv("Subject", subject);
        if !message.form.email.is_empty() {
            ctx.output.kv("Email", &message.form.email);
        }
        if !message.form.phone.is_empty() {
            ctx.output.kv("Phone", &message.form.phone);
        }
        ctx.output.kv("Received", &format_date(message.created_at.as_ref()));
        ctx.output.info(message.form.message.trim());
    }
    Ok(())
}
