//! CLI command implementations.

pub mod checkout;
pub mod config;
pub mod contact;
pub mod health;
pub mod orders;
pub mod products;
pub mod repairs;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,

    /// Category slug, or "all".
    #[arg(long, default_value = "all")]
    pub category: String,

    /// "new", "pre-owned", or "all".
    #[arg(long, default_value = "all")]
    pub condition: String,

    /// Search text matched against name and description.
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products (default).
    List,
    /// Show one product.
    Show {
        /// Product ID.
        id: String,
    },
    /// Create a product from a JSON file.
    Add {
        /// Path to the product JSON.
        file: String,
    },
    /// Replace a product from a JSON file.
    Update {
        /// Path to the product JSON, including its id.
        file: String,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the services command.
#[derive(Args)]
pub struct ServicesArgs {
    /// Show a single service.
    pub id: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Product IDs to put in the cart; repeat an ID for more units.
    /// Without this, products are picked interactively.
    #[arg(short, long = "add")]
    pub add: Vec<String>,

    /// Launch the system browser on the WhatsApp link.
    #[arg(long)]
    pub open: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders.
    List {
        /// Status, or "all".
        #[arg(long, default_value = "all")]
        status: String,
        /// Payment method, or "all".
        #[arg(long, default_value = "all")]
        payment: String,
        /// Matches the last six characters of the id, customer name or email.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Order counts and completed revenue.
    Stats,
    /// Show one order.
    Show {
        /// Order ID.
        id: String,
    },
    /// Change an order's status.
    Status {
        /// Order ID.
        id: String,
        /// New status.
        status: String,
    },
    /// Delete an order.
    Delete {
        /// Order ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the repairs command.
#[derive(Args)]
pub struct RepairsArgs {
    #[command(subcommand)]
    pub command: RepairsCommand,
}

#[derive(Subcommand)]
pub enum RepairsCommand {
    /// Book a repair interactively and send it over WhatsApp.
    Book {
        /// Also record the booking with the backend.
        #[arg(long)]
        record: bool,
        /// Launch the system browser on the WhatsApp link.
        #[arg(long)]
        open: bool,
    },
    /// List repair jobs.
    List {
        /// Status, or "all".
        #[arg(long, default_value = "all")]
        status: String,
        /// Device type, or "all".
        #[arg(long, default_value = "all")]
        device: String,
        /// Matches customer name, brand, model or id.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Repair counts by status.
    Stats,
    /// Change a repair's status.
    Status {
        /// Repair ID.
        id: String,
        /// New status.
        status: String,
    },
    /// Delete a repair job.
    Delete {
        /// Repair ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    #[command(subcommand)]
    pub command: ContactCommand,
}

#[derive(Subcommand)]
pub enum ContactCommand {
    /// Send a contact message over WhatsApp.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(short, long)]
        message: String,
        /// Also post the message to the backend.
        #[arg(long)]
        record: bool,
        /// Launch the system browser on the WhatsApp link.
        #[arg(long)]
        open: bool,
    },
    /// List messages received by the backend.
    List,
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
    /// Validate the config file.
    Validate,
}

/// Parse an "all"-or-value filter option.
pub(crate) fn selected<T, E>(
    value: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Result<Option<T>, E> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    parse(value).map(Some)
}
