//! Booking commands - fetch, cancel and terms

use anyhow::Result;
use carhire_client::CarHireClient;

use crate::output::{booking_summary, OutputContext, TermRow};

/// Show a booking
pub async fn fetch_booking(
    client: &CarHireClient,
    confirmation: &str,
    last_name: &str,
    ctx: &OutputContext,
) -> Result<()> {
    let booking = client.fetch_booking(confirmation, last_name).await?;
    ctx.print_kv(&booking_summary(&booking));
    Ok(())
}

/// Cancel a booking
pub async fn cancel_booking(
    client: &CarHireClient,
    confirmation: &str,
    last_name: &str,
    ctx: &OutputContext,
) -> Result<()> {
    let booking = client.fetch_booking(confirmation, last_name).await?;
    if booking.status.is_cancelled {
        ctx.warn(&format!(
            "Booking {} is already cancelled",
            booking.supplier_confirmation
        ));
        return Ok(());
    }

    client.cancel_booking(&booking).await?;
    ctx.success(&format!("Booking {} cancelled", booking.supplier_confirmation));
    Ok(())
}

/// Show the terms and conditions of a booking
pub async fn terms(
    client: &CarHireClient,
    confirmation: &str,
    last_name: &str,
    ctx: &OutputContext,
) -> Result<()> {
    let booking = client.fetch_booking(confirmation, last_name).await?;
    let terms = client.booking_terms(&booking).await?;

    let rows: Vec<TermRow> = terms.iter().map(TermRow::from).collect();

    ctx.print(&rows);
    Ok(())
}
