//! # Seed Data Generator
//!
//! Creates the cashier account and the coffee-shop catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./till.db with cashier / password123 and the catalog
//! cargo run -p till-db --bin seed
//!
//! # Specify database path and credentials
//! cargo run -p till-db --bin seed -- --db ./data/till.db --username anna --password s3cret
//!
//! # Only print an argon2 hash (for inserting a user by hand)
//! cargo run -p till-db --bin seed -- --hash-only s3cret
//! ```
//!
//! Products are inserted only into an empty catalog; the user only if the
//! username is free. Running the seed twice is harmless.

use anyhow::{bail, Context};
use std::env;
use till_core::NewProduct;
use till_db::{credentials, Database, DbConfig, DbError};
use tracing_subscriber::EnvFilter;

/// (name, price_cents, cost_cents, stock)
const CATALOG: &[(&str, i64, i64, i64)] = &[
    ("Cappuccino", 450, 140, 50),
    ("Croissant", 300, 110, 30),
    ("Espresso", 450, 120, 40),
    ("Coffee", 250, 70, 60),
    ("Chocolate", 250, 90, 25),
    ("Yagvri Tea", 300, 80, 20),
    ("Peppermint Tea", 200, 50, 35),
    ("Chocolate Cake", 400, 160, 15),
    ("Muffin", 350, 120, 20),
    ("Bagel", 350, 110, 25),
    ("Sandwich", 750, 320, 20),
    ("Salad", 900, 380, 15),
];

struct SeedArgs {
    db_path: String,
    username: String,
    password: String,
    hash_only: Option<String>,
}

fn parse_args() -> anyhow::Result<Option<SeedArgs>> {
    let args: Vec<String> = env::args().collect();

    let mut parsed = SeedArgs {
        db_path: env::var("TILL_DATABASE_PATH").unwrap_or_else(|_| "./till.db".to_string()),
        username: "cashier".to_string(),
        password: "password123".to_string(),
        hash_only: None,
    };

    let mut i = 1;
    while i < args.len() {
        let value = || {
            args.get(i + 1)
                .cloned()
                .with_context(|| format!("{} needs a value", args[i]))
        };

        match args[i].as_str() {
            "--db" | "-d" => {
                parsed.db_path = value()?;
                i += 1;
            }
            "--username" | "-u" => {
                parsed.username = value()?;
                i += 1;
            }
            "--password" | "-p" => {
                parsed.password = value()?;
                i += 1;
            }
            "--hash-only" => {
                parsed.hash_only = Some(value()?);
                i += 1;
            }
            "--help" | "-h" => {
                println!("Till POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>          Database file path (default: $TILL_DATABASE_PATH or ./till.db)");
                println!("  -u, --username <NAME>    Cashier username (default: cashier)");
                println!("  -p, --password <PW>      Cashier password (default: password123)");
                println!("      --hash-only <PW>     Print an argon2 hash and exit");
                println!("  -h, --help               Show this help message");
                return Ok(None);
            }
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }

    Ok(Some(parsed))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    if let Some(password) = args.hash_only {
        let hash = credentials::hash_password(&password)?;
        println!("{}", hash);
        println!();
        println!("INSERT INTO users (username, password_hash, created_at)");
        println!("VALUES ('<username>', '{}', datetime('now'));", hash);
        return Ok(());
    }

    println!("🌱 Till POS Seed Data Generator");
    println!("===============================");
    println!("Database: {}", args.db_path);
    println!();

    let db = Database::new(DbConfig::new(&args.db_path))
        .await
        .context("opening database")?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Cashier account
    match db.users().create(&args.username, &args.password).await {
        Ok(user) => println!("✓ Created user '{}' (id {})", user.username, user.id),
        Err(DbError::UniqueViolation { .. }) => {
            println!("⚠ User '{}' already exists, leaving it untouched", args.username)
        }
        Err(e) => return Err(e).context("creating user"),
    }

    // Catalog
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping catalog to avoid duplicates.");
    } else {
        for (name, price_cents, cost_cents, stock_quantity) in CATALOG {
            let product = db
                .products()
                .insert(&NewProduct {
                    name: name.to_string(),
                    price_cents: *price_cents,
                    cost_cents: *cost_cents,
                    stock_quantity: *stock_quantity,
                })
                .await
                .with_context(|| format!("inserting {}", name))?;

            println!(
                "  + #{:<3} {:<16} {:>7}  stock {}",
                product.id,
                product.name,
                product.price().to_string(),
                product.stock_quantity
            );
        }
        println!("✓ Inserted {} products", CATALOG.len());
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
