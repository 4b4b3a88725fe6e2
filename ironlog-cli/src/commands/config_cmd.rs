use anyhow::Result;
use std::process::Command;

use super::output;
use super::AppContext;
use crate::config::Config;

pub async fn show_config(ctx: &AppContext) -> Result<()> {
    let config_str = toml::to_string_pretty(&ctx.config)?;

    output::heading("Current Configuration");
    println!("# {}", ctx.config_path.display());
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn edit_config(ctx: &AppContext) -> Result<()> {
    // Ensure config file exists
    if !ctx.config_path.exists() {
        Config::default().save_to(&ctx.config_path)?;
    }

    // Open in default editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    Command::new(editor).arg(&ctx.config_path).status()?;

    // Reject a broken file right away
    Config::load_from(&ctx.config_path)?;

    output::success("Configuration saved!");

    Ok(())
}

pub async fn init_config(ctx: &AppContext, force: bool) -> Result<()> {
    if ctx.config_path.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            ctx.config_path.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(&ctx.config_path)?;

    output::success(format!(
        "Configuration initialized at: {}",
        ctx.config_path.display()
    ));
    println!();
    println!("You can edit it with: ironlog config edit");

    Ok(())
}
