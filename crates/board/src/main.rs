use anyhow::Context;

use tablebook_board::{BoardConfig, ReservationBoard};
use tablebook_core::Entity;

/// Print a read-only summary of today's board.
///
/// An optional first argument filters the list by customer, table or area.
fn main() -> anyhow::Result<()> {
    tablebook_observability::init();

    let config = BoardConfig::from_env().context("invalid tablebook configuration")?;
    let board = ReservationBoard::from_config(&config)
        .with_context(|| format!("failed to open reservation board in {:?}", config.storage_dir))?;

    if !board.persistence().is_available() {
        tracing::warn!("storage unavailable; changes made this session will not be saved");
    }

    let search = std::env::args().nth(1).unwrap_or_default();
    let metrics = board.query_metrics();
    println!(
        "{}: {} reservation(s) today, next: {}",
        metrics.today, metrics.today_count, metrics.next_upcoming
    );

    let area = &board.catalog().first_area().name;
    println!("\n{area}");
    for table in board.query_occupancy(area, Some(metrics.today)) {
        match &table.booking {
            Some(b) => println!("  {:<5} {} • {}", table.table, b.time.format("%H:%M"), b.customer_name),
            None => println!("  {:<5} Available", table.table),
        }
    }

    let rows = board.query_list(Some(metrics.today), &search);
    println!();
    if rows.is_empty() {
        println!("No reservations for the selected day.");
    }
    for r in rows {
        println!(
            "  {}  {:<20} {:<12} party of {}  {} • {}  [{}]",
            r.time().format("%H:%M"),
            r.customer_name(),
            if r.phone().is_empty() { "No phone" } else { r.phone() },
            r.party_size(),
            r.area(),
            r.table(),
            r.id(),
        );
    }

    Ok(())
}
