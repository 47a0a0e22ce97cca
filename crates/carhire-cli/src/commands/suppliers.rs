//! Suppliers command - list rental companies

use anyhow::Result;
use carhire_client::CarHireClient;

use crate::output::{OutputContext, SupplierRow};

/// List all suppliers
pub async fn suppliers(client: &CarHireClient, ctx: &OutputContext) -> Result<()> {
    let suppliers = client.suppliers().await?;

    let rows: Vec<SupplierRow> = suppliers.iter().map(SupplierRow::from).collect();

    ctx.print(&rows);
    Ok(())
}
