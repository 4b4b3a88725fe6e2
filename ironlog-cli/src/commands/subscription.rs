use anyhow::Result;
use chrono::Utc;

use super::output;
use super::AppContext;

pub async fn show_status(ctx: &AppContext) -> Result<()> {
    let entitlement = ctx.api()?.entitlement().await?;

    output::heading("Subscription");

    if entitlement.is_active(Utc::now()) {
        output::success("IronLog PRO is active");
        match entitlement.expires_at {
            Some(expires) => println!("Renews or expires on {}", expires.format("%Y-%m-%d")),
            None => println!("Lifetime access"),
        }
    } else {
        println!("Free plan");
        println!();
        println!("See 'ironlog subscription packages' for PRO options.");
    }

    Ok(())
}

pub async fn list_packages(ctx: &AppContext) -> Result<()> {
    let packages = ctx.api()?.subscription_packages().await?;

    output::heading("PRO packages");

    for package in &packages {
        let per_month = package
            .monthly_price()
            .map(|p| format!(" ({:.2} {}/month)", p, package.currency))
            .unwrap_or_default();
        println!(
            "{:<20} {:>8.2} {} {}{}",
            package.name, package.price, package.currency, package.period, per_month
        );
    }

    println!();
    println!("Purchases are completed in the mobile app.");
    Ok(())
}
