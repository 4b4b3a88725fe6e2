use anyhow::Result;
use clap::Args;

use super::output;
use super::AppContext;
use crate::store::UserStore;

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if !ctx.tokens().is_authenticated()? {
            println!("You are not logged in.");
            println!();
            println!("Use 'ironlog login' to authenticate.");
            return Ok(());
        }

        println!("Fetching user information...");
        println!();

        let client = ctx.api()?;
        let users = UserStore::new();

        match users.fetch_user(&client).await {
            Some(user) => {
                output::success("Authenticated as:");
                println!();
                println!("  Username: {}", user.username);
                println!("  Name:     {}", user.display_name());
                println!("  Email:    {}", user.email);
                println!("  User ID:  {}", user.id);
                println!("  Plan:     {}", if user.is_pro { "PRO" } else { "Free" });
                if let Some(joined) = user.date_joined {
                    println!("  Joined:   {}", joined.format("%Y-%m-%d"));
                }

                Ok(())
            }
            None => {
                output::failure("Failed to fetch user information.");
                println!();
                println!("Your session may have expired.");
                println!("Use 'ironlog login' to authenticate again.");
                Err(anyhow::anyhow!("Could not load user profile"))
            }
        }
    }
}
