//! Sipayi CLI - drive the ordering session from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add items and inspect the cart
//! sipayi add "Masala Dosa" 80
//! sipayi add "Filter Coffee" 30
//! sipayi cart
//!
//! # Adjust quantities (0-based index, signed delta)
//! sipayi qty 1 2
//! sipayi remove 0
//!
//! # Check out and track
//! sipayi checkout --name "Asha Rao" --email asha@example.com \
//!     --phone 9876543210 --address "12 MG Road, Bengaluru" --payment upi
//! sipayi orders
//! sipayi track HS1700000000000123
//! ```
//!
//! State lives in a JSON file (default `sipayi-store.json`, override
//! with `--store`), standing in for the browser's persistent storage.

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI talks on stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sipayi_core::{Money, OrderId};
use sipayi_session::{
    CustomerDetails, DeliveryDetails, PaymentDetails, PaymentMethod, Session, SessionConfig,
    TracingNotifier,
};
use tracing_subscriber::EnvFilter;

mod store;

use store::FileStore;

#[derive(Parser)]
#[command(name = "sipayi")]
#[command(author, version, about = "Sipayi ordering session CLI")]
struct Cli {
    /// Path of the JSON file backing the session state
    #[arg(long, default_value = "sipayi-store.json", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a menu item to the cart
    Add {
        /// Menu item name
        name: String,
        /// Unit price in rupees
        price: Decimal,
    },
    /// Show the cart with line totals
    Cart,
    /// Remove the cart line at the given 0-based index
    Remove {
        /// Line index
        index: usize,
    },
    /// Add a signed delta to a line's quantity (<= 0 removes it)
    Qty {
        /// Line index
        index: usize,
        /// Signed quantity change
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Delete the cart entirely
    Clear,
    /// Create an order from the cart, validate it, and submit it
    Checkout {
        /// Customer name
        #[arg(long)]
        name: String,
        /// Customer email
        #[arg(long)]
        email: String,
        /// Customer phone
        #[arg(long)]
        phone: String,
        /// Delivery address
        #[arg(long)]
        address: String,
        /// Payment method (cash, card, upi)
        #[arg(long, value_enum)]
        payment: PaymentMethodArg,
    },
    /// List the order history
    Orders,
    /// Show the tracking timeline for one order
    Track {
        /// Order id, e.g. HS1700000000000123
        order_id: String,
    },
}

/// Clap-friendly wrapper for [`PaymentMethod`].
#[derive(Clone, Copy, clap::ValueEnum)]
enum PaymentMethodArg {
    Cash,
    Card,
    Upi,
}

impl From<PaymentMethodArg> for PaymentMethod {
    fn from(arg: PaymentMethodArg) -> Self {
        match arg {
            PaymentMethodArg::Cash => Self::Cash,
            PaymentMethodArg::Card => Self::Card,
            PaymentMethodArg::Upi => Self::Upi,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(message) = run(cli).await {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let store = FileStore::open(&cli.store).map_err(|err| err.to_string())?;
    let config = SessionConfig::from_env().map_err(|err| err.to_string())?;
    let session = Session::new(store, TracingNotifier, config);

    match cli.command {
        Commands::Add { name, price } => {
            let price = Money::new(price).map_err(|err| err.to_string())?;
            session
                .cart()
                .add(&name, price)
                .map_err(|err| err.to_string())?;
            println!("Added {name} ({price})");
        }
        Commands::Cart => {
            let cart = session.cart();
            let items = cart.items().map_err(|err| err.to_string())?;
            if items.is_empty() {
                println!("Cart is empty");
                return Ok(());
            }
            for (index, item) in items.iter().enumerate() {
                println!(
                    "{index}: {} x{} @ {} = {}",
                    item.name,
                    item.quantity,
                    item.price,
                    item.line_total()
                );
            }
            let total = cart.total().map_err(|err| err.to_string())?;
            let count = cart.item_count().map_err(|err| err.to_string())?;
            println!("{count} items, total {total}");
        }
        Commands::Remove { index } => {
            session
                .cart()
                .remove(index)
                .map_err(|err| err.to_string())?;
            println!("Removed line {index}");
        }
        Commands::Qty { index, delta } => {
            session
                .cart()
                .update_quantity(index, delta)
                .map_err(|err| err.to_string())?;
            println!("Updated line {index}");
        }
        Commands::Clear => {
            session.cart().clear().map_err(|err| err.to_string())?;
            println!("Cart cleared");
        }
        Commands::Checkout {
            name,
            email,
            phone,
            address,
            payment,
        } => {
            let service = session.orders();
            let mut order = service.create_from_cart().map_err(|err| err.to_string())?;
            order.customer = CustomerDetails { name, email, phone };
            order.delivery = DeliveryDetails {
                address,
                instructions: None,
            };
            order.payment = PaymentDetails {
                method: Some(payment.into()),
            };

            let summary = service.summary(&order);
            println!(
                "Subtotal {}  Delivery {}  Tax {}  Total {}",
                summary.subtotal, summary.delivery_fee, summary.tax, summary.total
            );

            let result = service.submit(&order).await;
            if !result.success {
                return Err(result.message);
            }
            println!("{}", result.message);
            if let Some(order_id) = result.order_id {
                println!("Order id: {order_id}");
            }
        }
        Commands::Orders => {
            let service = session.orders();
            let orders = service.all().map_err(|err| err.to_string())?;
            if orders.is_empty() {
                println!("No orders yet");
                return Ok(());
            }
            for order in orders {
                let summary = service.summary(&order);
                println!(
                    "{} [{}] {} - {} items, total {}",
                    order.order_id,
                    order.status,
                    order.timestamp.to_rfc3339(),
                    order.items.len(),
                    summary.total
                );
            }
        }
        Commands::Track { order_id } => {
            let tracking = session
                .orders()
                .track(&OrderId::from(order_id.as_str()))
                .map_err(|err| err.to_string())?;
            let Some(tracking) = tracking else {
                return Err(format!("no order with id {order_id}"));
            };
            println!("Order {}", tracking.order_id);
            for stage in tracking.stages {
                let marker = if stage.status == tracking.current_status {
                    ">"
                } else {
                    " "
                };
                println!("{marker} {:>2} min  {}", stage.minutes, stage.label);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_qty_accepts_negative_delta() {
        let cli = Cli::try_parse_from(["sipayi", "qty", "1", "-2"]).unwrap();
        match cli.command {
            Commands::Qty { index, delta } => {
                assert_eq!(index, 1);
                assert_eq!(delta, -2);
            }
            _ => panic!("expected the qty subcommand"),
        }
    }
}
