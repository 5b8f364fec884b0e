use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use template_report::{
    count_items, insert_items, load_item_csv, load_price_cache, render_template, setup_database,
    ItemDatabase, NoDatabase, ReportConfig, SqliteItemDatabase,
};

#[derive(Parser)]
#[command(name = "template-report")]
#[command(version)]
#[command(about = "Render character templates as priced two-column reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template to stdout
    Render(RenderArgs),

    /// Import item rows from CSV into an SQLite item database
    ImportItems {
        /// Item CSV file
        csv: PathBuf,

        /// SQLite database file (created if missing)
        db: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Exported template text file
    template: PathBuf,

    /// Realm used for `name:realm` lookups (overrides the config file)
    #[arg(long)]
    realm: Option<String>,

    /// SQLite item database
    #[arg(long)]
    db: Option<PathBuf>,

    /// Local price cache, a flat JSON object of item name to price
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Report configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::ImportItems { csv, db } => run_import(&csv, &db),
    }
}

fn run_render(args: RenderArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    if let Some(realm) = args.realm {
        config.realm = realm;
    }

    let local_cache = match &args.prices {
        Some(path) => load_price_cache(path)?,
        None => HashMap::new(),
    };

    let database: Box<dyn ItemDatabase> = match &args.db {
        Some(path) => Box::new(SqliteItemDatabase::open(path)?),
        None => Box::new(NoDatabase),
    };

    let text = fs::read_to_string(&args.template)
        .with_context(|| format!("Failed to read template: {:?}", args.template))?;

    let report = render_template(&text, &config, &local_cache, database.as_ref());

    if args.json {
        println!("{}", report.to_json()?);
    } else if report.is_empty() {
        eprintln!("⚠️  Nothing recognized in {:?}", args.template);
    } else {
        println!("{}", report.text);
    }

    if !report.unresolved.is_empty() {
        eprintln!("\n❓ No price or category for {} item(s):", report.unresolved.len());
        for name in &report.unresolved {
            eprintln!("   - {}", name);
        }
    }

    Ok(())
}

fn run_import(csv_path: &Path, db_path: &Path) -> Result<()> {
    println!("🗄️  Item Import - CSV → SQLite + WAL");

    println!("\n📂 Loading CSV...");
    let rows = load_item_csv(csv_path)?;
    println!("✓ Loaded {} item rows from CSV", rows.len());

    println!("\n🔧 Setting up database...");
    let conn = rusqlite::Connection::open(db_path)
        .with_context(|| format!("Failed to open item database: {:?}", db_path))?;
    setup_database(&conn)?;
    println!("✓ Database initialized with WAL mode");

    println!("\n💾 Inserting items...");
    let written = insert_items(&conn, &rows)?;

    let count = count_items(&conn)?;
    println!("✓ Wrote {} rows, database now holds {} items", written, count);

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
