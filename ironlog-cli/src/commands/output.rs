use colored::Colorize;

use crate::api::ApiError;
use crate::session::SessionError;

pub fn success(message: impl std::fmt::Display) {
    println!("{} {}", "✓".green(), message);
}

pub fn failure(message: impl std::fmt::Display) {
    println!("{} {}", "✗".red(), message);
}

pub fn heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "─".repeat(32).dimmed());
}

/// Print a hint for errors the user can act on
pub fn explain_error(error: &anyhow::Error) {
    if let Some(api_error) = error.downcast_ref::<ApiError>() {
        match api_error {
            e if e.requires_login() => {
                println!();
                println!("Use 'ironlog login' to authenticate.");
            }
            ApiError::ProRequired(_) => {
                println!();
                println!("See 'ironlog subscription packages' for PRO options.");
            }
            ApiError::NetworkError(_) => {
                println!();
                println!("Check the server address with 'ironlog config show'.");
            }
            _ => {}
        }
    } else if let Some(SessionError::Validation(e)) = error.downcast_ref::<SessionError>() {
        failure(e);
    }
}

pub fn kg(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0} kg", weight)
    } else {
        format!("{} kg", weight)
    }
}
