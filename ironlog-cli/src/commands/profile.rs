use anyhow::Result;
use dialoguer::Confirm;

use super::output;
use super::AppContext;
use crate::models::ProfileUpdate;

pub async fn update_profile(
    ctx: &AppContext,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<()> {
    let update = ProfileUpdate {
        email,
        first_name,
        last_name,
    };

    if update.is_empty() {
        println!("Nothing to update. Pass --email, --first-name or --last-name.");
        return Ok(());
    }

    let user = ctx.api()?.update_profile(&update).await?;

    output::success(format!("Profile updated for {}", user.display_name()));
    Ok(())
}

pub async fn delete_account(ctx: &AppContext, force: bool) -> Result<()> {
    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Delete your account and all workouts? This cannot be undone")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.api()?.delete_account().await?;

    output::success("Account deleted.");
    Ok(())
}
