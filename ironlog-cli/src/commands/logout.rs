use anyhow::Result;
use clap::Args;

use super::output;
use super::AppContext;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if !ctx.tokens().is_authenticated()? {
            println!("You are not logged in.");
            return Ok(());
        }

        ctx.api()?.logout().await?;

        output::success("Logged out successfully!");

        Ok(())
    }
}
