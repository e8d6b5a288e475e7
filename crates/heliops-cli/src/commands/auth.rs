//! `heliops login|logout|whoami` command implementations

use crate::context::AppContext;
use crate::error::Result;
use colored::Colorize;
use tracing::info;

/// Exchange credentials for a token and store the session.
///
/// The password is prompted for when not supplied.
pub async fn login(ctx: &mut AppContext, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => inquire::Password::new("Password:")
            .without_confirmation()
            .prompt()?,
    };

    let response = ctx.api.login(email, &password).await?;
    ctx.sign_in(&response.token, &response.user)?;

    info!(user_id = %response.user.id, "Logged in");
    println!(
        "{} Logged in as {} ({})",
        "✓".green(),
        response.user.name.cyan(),
        response.user.role
    );
    Ok(())
}

pub async fn logout(ctx: &mut AppContext) -> Result<()> {
    if !ctx.session.is_logged_in() {
        println!("Not logged in.");
        return Ok(());
    }

    ctx.sign_out()?;
    println!("{} Logged out", "✓".green());
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    match ctx.session.current_user() {
        Some(user) => {
            println!("{:<10} {}", "Name:", user.name.cyan());
            println!("{:<10} {}", "Email:", user.email);
            println!("{:<10} {}", "Role:", user.role);
            if let Some(license) = &user.license_number {
                println!("{:<10} {}", "License:", license);
            }
        },
        None => println!("Logged in, but the stored user record is unavailable."),
    }

    println!("{:<10} {}", "API:", ctx.api.base_url());
    Ok(())
}
