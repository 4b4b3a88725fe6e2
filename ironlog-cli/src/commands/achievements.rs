use anyhow::Result;
use colored::Colorize;

use super::output;
use super::AppContext;

pub async fn list_achievements(ctx: &AppContext, recent: bool) -> Result<()> {
    let client = ctx.api()?;
    let achievements = if recent {
        client.recent_achievements().await?
    } else {
        client.list_achievements().await?
    };

    output::heading(if recent { "Recent Achievements" } else { "Achievements" });

    if achievements.is_empty() {
        println!("Nothing here yet. Keep lifting!");
        return Ok(());
    }

    for achievement in &achievements {
        match achievement.achieved_at {
            Some(at) => println!(
                "{} {}  {}",
                "★".yellow(),
                achievement.title.bold(),
                at.format("%Y-%m-%d").to_string().dimmed()
            ),
            None => println!(
                "☆ {}  {}%",
                achievement.title,
                achievement.progress_percentage()
            ),
        }
        if !achievement.description.is_empty() {
            println!("    {}", achievement.description.dimmed());
        }
    }

    Ok(())
}
