//! `heliops settings` command implementation

use crate::context::AppContext;
use crate::error::Result;
use clap::ValueEnum;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> bool {
        toggle == Toggle::On
    }
}

/// Change preferences when asked, then print the current ones
pub async fn run(ctx: &mut AppContext, dark_mode: Option<Toggle>) -> Result<()> {
    if let Some(toggle) = dark_mode {
        ctx.session.set_dark_mode(toggle.into())?;
        println!("{} Preferences saved", "✓".green());
    }

    let mode = if ctx.session.dark_mode() { "on" } else { "off" };
    println!("{:<12} {}", "dark mode:", mode);
    println!("{:<12} {}", "session:", ctx.session.path().display());
    Ok(())
}
