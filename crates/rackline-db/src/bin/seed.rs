//! # Seed Data Generator
//!
//! Populates the database with a demo apparel catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p rackline-db --bin seed
//!
//! # Specify database path and owner
//! cargo run -p rackline-db --bin seed -- --db ./data/rackline.db --email demo@rackline.dev
//! ```
//!
//! ## Generated Catalog
//! Creates a brand for the demo user and products across categories
//! (Tops, Bottoms, Outerwear, Shoes, Accessories), each with a spread of
//! color/size variants, deterministic pseudo-random prices and stock.

use std::env;

use rackline_core::types::{ProductDraft, VariantDraft};
use rackline_db::{Database, DbConfig};
use rackline_store::session::open_session;
use rackline_store::InventoryStore;

/// (category, sub_category, base names)
const CATALOG: &[(&str, &str, &[&str])] = &[
    (
        "Tops",
        "Tees",
        &["Crew Tee", "V-Neck Tee", "Pocket Tee", "Long Sleeve Tee", "Graphic Tee"],
    ),
    (
        "Tops",
        "Shirts",
        &["Oxford Shirt", "Flannel Shirt", "Linen Shirt", "Denim Shirt"],
    ),
    (
        "Bottoms",
        "Jeans",
        &["Slim Jean", "Straight Jean", "Relaxed Jean"],
    ),
    (
        "Bottoms",
        "Shorts",
        &["Chino Short", "Cargo Short", "Denim Short"],
    ),
    (
        "Outerwear",
        "Jackets",
        &["Bomber Jacket", "Denim Jacket", "Puffer Jacket", "Rain Shell"],
    ),
    ("Shoes", "Sneakers", &["Court Sneaker", "Runner", "High Top"]),
    (
        "Accessories",
        "Headwear",
        &["Dad Cap", "Beanie", "Bucket Hat"],
    ),
];

const COLORS: &[&str] = &["Black", "White", "Navy", "Olive", "Grey"];
const SIZES: &[&str] = &["S", "M", "L", "XL"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./rackline_dev.db");
    let mut user_id = String::from("seed-user");
    let mut email = String::from("demo@rackline.dev");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    user_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--email" | "-e" => {
                if i + 1 < args.len() {
                    email = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Rackline POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./rackline_dev.db)");
                println!("  -u, --user <ID>      Owner user id (default: seed-user)");
                println!("  -e, --email <EMAIL>  Owner email (default: demo@rackline.dev)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Rackline POS Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let session = open_session(&db, &user_id, &email).await?;
    println!("✓ Brand ready: {}", session.brand.name);

    let existing = db.list_products(session.brand_id()).await?;
    if !existing.is_empty() {
        println!("⚠ Brand already has {} products", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating catalog...");

    let mut products = 0usize;
    let mut variants = 0usize;
    let start = std::time::Instant::now();

    for (category, sub_category, names) in CATALOG {
        for (name_idx, name) in names.iter().enumerate() {
            let seed = products + name_idx;
            // Deterministic base price: $14.99 - $94.99 in $5 steps.
            let price_cents = 1499 + ((seed * 7) % 17) as i64 * 500;

            let product = db
                .insert_product(
                    session.brand_id(),
                    &ProductDraft {
                        category: Some(category.to_string()),
                        sub_category: Some(sub_category.to_string()),
                        base_name: name.to_string(),
                        description: None,
                        price_cents,
                    },
                )
                .await?;
            products += 1;

            for (color_idx, color) in COLORS.iter().enumerate().take(2 + seed % 3) {
                for (size_idx, size) in SIZES.iter().enumerate() {
                    let variant_seed = seed * 100 + color_idx * 10 + size_idx;
                    db.insert_variant(&VariantDraft {
                        product_id: product.id,
                        color: Some(color.to_string()),
                        size: Some(size.to_string()),
                        sku: Some(format!(
                            "{}-{:03}-{}{}",
                            category[..3].to_uppercase(),
                            seed,
                            &color[..1],
                            size
                        )),
                        barcode: Some(format!("200{:010}", variant_seed)),
                        stock: (variant_seed % 25) as i64,
                        additional_price_cents: if size_idx == 3 { 200 } else { 0 },
                    })
                    .await?;
                    variants += 1;
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} products / {} variants in {:?}",
        products, variants, elapsed
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
