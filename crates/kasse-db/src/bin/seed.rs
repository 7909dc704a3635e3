//! # Seed Data Generator
//!
//! Populates the database with the demo food stand catalog.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasse_dev.db
//! cargo run -p kasse-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasse-db --bin seed -- --db ./data/kasse.db
//! ```
//!
//! Existing codes keep their sold counters; only name and price are
//! refreshed. Log columns for every code are added as well, so the till can
//! start selling right away.

use kasse_core::{Money, ShortCode};
use kasse_db::{Database, DbConfig};
use std::env;

/// (name, short code, price in cents)
const MENU: &[(&str, &str, i64)] = &[
    ("Soup", "SP", 350),
    ("Bratwurst", "BW", 300),
    ("Currywurst", "CW", 380),
    ("Fries", "PF", 250),
    ("Waffle", "WF", 200),
    ("Coffee", "KF", 150),
    ("Tea", "TE", 120),
    ("Lemonade", "LM", 220),
    ("Water", "WA", 100),
    ("Cup Deposit", "PFAND", 100),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasse_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasse Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasse_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kasse Seed Data Generator");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let catalog = db.catalog();
    let mut codes = Vec::with_capacity(MENU.len());
    for (name, code, cents) in MENU {
        let code = ShortCode::new(*code)?;
        catalog.upsert(name, &code, Money::from_cents(*cents)).await?;
        println!("  {:<6} {:<12} {}", code, name, Money::from_cents(*cents));
        codes.push(code);
    }

    let added = db.transaction_log().ensure_code_columns(&codes).await?;

    println!();
    println!("✓ {} items in food_list", catalog.count().await?);
    println!("✓ {} new transaction_log columns", added.len());

    db.close().await;
    Ok(())
}
