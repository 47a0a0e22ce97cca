//! Status command - show the connected account

use anyhow::Result;
use carhire_client::CarHireClient;

use crate::output::OutputContext;

/// Show client readiness and the account alias
pub fn status(client: &CarHireClient, ctx: &OutputContext) -> Result<()> {
    ctx.print_kv(&[
        ("Status", format!("{:?}", client.status())),
        ("Alias", client.alias().unwrap_or_default()),
    ]);
    Ok(())
}
