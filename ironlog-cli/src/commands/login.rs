use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};

use super::output;
use super::AppContext;
use crate::store::UserStore;

#[derive(Args)]
pub struct LoginCommand {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    username: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        println!("IronLog - Login");
        println!();

        let username: String = match self.username {
            Some(username) => username,
            None => Input::new().with_prompt("Username").interact_text()?,
        };

        let password = Password::new().with_prompt("Password").interact()?;

        println!();
        println!("Logging in as {}...", username);

        let client = ctx.api()?;

        match client.login(&username, &password).await {
            Ok(_) => {
                // Tokens are saved by ApiClient; fetching the profile caches the PRO flag
                output::success("Login successful!");
                println!();

                let users = UserStore::new();
                if let Some(user) = users.fetch_user(&client).await {
                    println!("Welcome, {}!", user.display_name());
                    if user.is_pro {
                        println!("IronLog PRO is active.");
                    }
                }

                Ok(())
            }
            Err(e) => {
                output::failure(format!("Login failed: {}", e));
                Err(e.into())
            }
        }
    }
}
