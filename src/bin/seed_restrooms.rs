// src/bin/seed_restrooms.rs
// DOCUMENTATION: Load users and restrooms from a JSON file into PostgreSQL
// USAGE: seed_restrooms <path/to/seed.json>

use anyhow::{bail, Context, Result};
use chamjimayo::config::{init_db_pool, Config};
use chamjimayo::db::{apply_seed, PgDatabase, SeedData};
use dotenv::dotenv;
use std::env;
use std::time::Instant;

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

async fn run(path: &str) -> Result<()> {
    let config = Config::from_env();
    if config.database_url.is_empty() {
        bail!("DATABASE_URL must be set");
    }

    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let seed = SeedData::from_json(&raw)?;
    println!(
        "{}📄 {}: {} users, {} restrooms{}",
        CYAN,
        path,
        seed.users.len(),
        seed.restrooms.len(),
        RESET
    );

    let pool = init_db_pool(&config)
        .await
        .context("connecting to database")?;
    let db = PgDatabase::new(pool);

    let started = Instant::now();
    let stats = apply_seed(&db, &seed).await?;

    println!("\n{}✨ Seed applied{}", GREEN, RESET);
    println!("{}📊 Totals:{}", BOLD, RESET);
    println!("  • Users created: {}{}{}", GREEN, stats.users_created, RESET);
    println!("  • Restrooms created: {}{}{}", GREEN, stats.restrooms_created, RESET);
    println!("  • Duration: {:.1}s", started.elapsed().as_secs_f64());
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("{}Usage: seed_restrooms <seed.json>{}", RED, RESET);
        std::process::exit(2);
    };

    if let Err(e) = run(&path).await {
        eprintln!("{}❌ Seeding failed: {:#}{}", RED, e, RESET);
        std::process::exit(1);
    }
}
