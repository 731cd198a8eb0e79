use anyhow::Result;
use coin_database::stats::{get_database_stats, DatabaseStats};
use coin_database::DatabaseConfig;
use prettytable::{format, Cell, Row, Table};

use crate::commands::common::{mask_password, require_database_url};

/// Run database migrations only
pub async fn migrate(database_url: Option<String>) -> Result<()> {
    let db_url = require_database_url(database_url)?;

    tracing::info!("Running database migrations");
    tracing::info!("Database URL: {}", mask_password(&db_url));

    let pool = coin_database::connect(&DatabaseConfig::new(&db_url).without_migrations()).await?;
    coin_database::run_migrations(&pool).await?;

    tracing::info!("✓ Migrations completed successfully");
    Ok(())
}

/// Show database statistics
pub async fn stats(database_url: Option<String>, format: &str) -> Result<()> {
    let db_url = require_database_url(database_url)?;

    tracing::info!("Fetching database statistics");
    let pool = coin_database::connect(&DatabaseConfig::new(&db_url).without_migrations()).await?;

    let stats = get_database_stats(&pool).await?;

    match format.to_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => display_stats_table(&stats),
    }

    Ok(())
}

fn format_ts(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn bold(text: &str) -> Cell {
    Cell::new(text).with_style(prettytable::Attr::Bold)
}

/// Display statistics in a table format
fn display_stats_table(stats: &DatabaseStats) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(vec![
        bold("Table"),
        bold("Row Count"),
        bold("Size"),
        bold("Min Timestamp"),
        bold("Max Timestamp"),
    ]));

    for t in &stats.tables {
        table.add_row(Row::new(vec![
            Cell::new(&t.table_name),
            Cell::new_align(&t.row_count.to_string(), format::Alignment::RIGHT),
            Cell::new_align(&t.total_size, format::Alignment::RIGHT),
            Cell::new(&format_ts(t.min_ts)),
            Cell::new(&format_ts(t.max_ts)),
        ]));
    }

    println!();
    table.printstd();

    if !stats.tracked_coins.is_empty() {
        let mut coins = Table::new();
        coins.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        coins.set_titles(Row::new(vec![
            bold("Coin"),
            bold("Snapshots"),
            bold("First"),
            bold("Latest"),
        ]));

        for c in &stats.tracked_coins {
            coins.add_row(Row::new(vec![
                Cell::new(&c.coin_id),
                Cell::new_align(&c.snapshots.to_string(), format::Alignment::RIGHT),
                Cell::new(&format_ts(c.first_ts)),
                Cell::new(&format_ts(c.latest_ts)),
            ]));
        }

        println!();
        coins.printstd();
    }

    println!();
    println!("Total database size: {}", stats.total_size);
    println!("Fetched at: {}", stats.fetched_at);
    println!();
}
