//! # Seed Data Generator
//!
//! Populates the database with sample orders for development.
//!
//! ## Usage
//! ```bash
//! # Generate 20 orders (default)
//! cargo run -p statusguard-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p statusguard-db --bin seed -- --count 200
//!
//! # Specify database path and switch the membership check off
//! cargo run -p statusguard-db --bin seed -- --db ./data/statusguard.db --allow-any-status-change
//! ```
//!
//! Orders cycle through every state with that state's default status, so
//! each state has something to comment on.

use std::env;

use statusguard_core::scope::{CONFIG_PATH_ALLOW_ANY_ORDER_STATUS_CHANGE, CONFIG_PATH_STORE_NAME};
use statusguard_core::{ConfigScope, OrderState, OrderWorkflow};
use statusguard_db::{Database, DbConfig, NewOrder};

const CUSTOMERS: &[(&str, &str)] = &[
    ("Veronica Costello", "roni_cost@example.com"),
    ("John Smith", "john.smith@example.com"),
    ("Amara Okafor", "amara.okafor@example.com"),
    ("Lukas Berger", "lukas.berger@example.com"),
    ("Mei Tanaka", "mei.tanaka@example.com"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut db_path = String::from("./statusguard.db");
    let mut allow_any_status_change = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--allow-any-status-change" => allow_any_status_change = true,
            "--help" | "-h" => {
                println!("Statusguard Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>              Number of orders to generate (default: 20)");
                println!("  -d, --db <PATH>              Database file path (default: ./statusguard.db)");
                println!("      --allow-any-status-change  Disable the state/status membership check");
                println!("  -h, --help                   Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Statusguard Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Orders:   {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    db.settings()
        .set_value(
            CONFIG_PATH_ALLOW_ANY_ORDER_STATUS_CHANGE,
            Some(if allow_any_status_change { "1" } else { "0" }),
            ConfigScope::Default,
        )
        .await?;
    db.settings()
        .set_value(CONFIG_PATH_STORE_NAME, Some("Statusguard Demo Store"), ConfigScope::Default)
        .await?;

    println!(
        "✓ Any-status override {}",
        if allow_any_status_change { "enabled" } else { "disabled" }
    );

    let existing = db.orders().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} orders", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let workflow = db.workflow().load().await?.unwrap_or_else(OrderWorkflow::standard);

    let mut generated = 0;
    for n in 0..count {
        let state = OrderState::ALL[n % OrderState::ALL.len()];
        let Some(status) = workflow.default_status(state) else {
            continue;
        };
        let (name, email) = CUSTOMERS[n % CUSTOMERS.len()];

        let order = NewOrder {
            increment_id: format!("{:09}", n + 1),
            state,
            status: status.to_string(),
            store_id: 1,
            customer_email: Some(email.to_string()),
            customer_name: Some(name.to_string()),
        };

        if let Err(e) = db.orders().insert(order).await {
            eprintln!("Failed to insert order {}: {}", n + 1, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Generated {} orders", generated);
    println!("✓ Seed complete!");

    Ok(())
}
