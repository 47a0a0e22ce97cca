//! Locations command - popular locations and location search

use anyhow::Result;
use carhire_client::CarHireClient;

use crate::output::{LocationRow, OutputContext};

/// List popular locations, or the locations matching `query`
pub async fn locations(
    client: &CarHireClient,
    query: Option<&str>,
    ctx: &OutputContext,
) -> Result<()> {
    let rows: Vec<LocationRow> = match query {
        Some(query) => client
            .search_locations(query)
            .await?
            .iter()
            .map(LocationRow::from)
            .collect(),
        None => client
            .top_locations()
            .await?
            .all
            .iter()
            .map(LocationRow::from)
            .collect(),
    };

    ctx.print(&rows);
    Ok(())
}
