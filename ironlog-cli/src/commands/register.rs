use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};

use super::output;
use super::AppContext;
use crate::api::RegisterRequest;

#[derive(Args)]
pub struct RegisterCommand {}

impl RegisterCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        println!("IronLog - Create account");
        println!();

        let username: String = Input::new().with_prompt("Username").interact_text()?;
        let email: String = Input::new()
            .with_prompt("Email")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.contains('@') && input.contains('.') {
                    Ok(())
                } else {
                    Err("Invalid email format")
                }
            })
            .interact_text()?;
        let password = Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?;

        let client = ctx.api()?;
        let request = RegisterRequest {
            username,
            email,
            password,
        };

        match client.register(&request).await {
            Ok(user) => {
                output::success(format!("Account {} created.", user.username));
                println!();
                println!("Use 'ironlog login' to sign in.");
                Ok(())
            }
            Err(e) => {
                output::failure(format!("Registration failed: {}", e));
                Err(e.into())
            }
        }
    }
}
