//! `heliops config` command implementation
//!
//! Shows the effective configuration after file and environment layering.

use crate::config::{config_dir, Config, CONFIG_FILE_NAME};
use crate::error::Result;
use colored::Colorize;

/// Show the effective configuration with credentials masked
pub async fn show(config: &Config) -> Result<()> {
    let config = config.redacted();

    println!("{}", "HeliOps CLI Configuration:".cyan().bold());
    println!();
    println!("{:<15} {}", "api_url:", config.api_url);
    println!("{:<15} {}s", "timeout:", config.timeout_secs);
    match config.session_path() {
        Ok(path) => println!("{:<15} {}", "session_file:", path.display()),
        Err(_) => println!("{:<15} -", "session_file:"),
    }

    match &config.storage {
        Some(storage) => {
            println!("{:<15} {}", "bucket:", storage.bucket);
            println!("{:<15} {}", "region:", storage.region);
            println!(
                "{:<15} {}",
                "endpoint:",
                storage.endpoint.as_deref().unwrap_or("(AWS default)")
            );
            println!("{:<15} {}", "access_key:", storage.access_key);
            println!("{:<15} {}", "secret_key:", storage.secret_key);
        },
        None => println!("{:<15} {}", "storage:", "not configured".yellow()),
    }

    println!();
    if let Some(dir) = config_dir() {
        println!("Config file: {}", dir.join(CONFIG_FILE_NAME).display());
    }
    println!("{}", "Environment Variables:".cyan());
    println!("  HELIOPS_CONFIG            - Config file path");
    println!("  HELIOPS_API_URL           - REST API base URL");
    println!("  HELIOPS_API_TIMEOUT_SECS  - Request timeout");
    println!("  HELIOPS_SESSION_FILE      - Session file path");
    println!("  HELIOPS_STORAGE_*         - Object storage settings");
    println!("  HELIOPS_LOG_*             - Logging settings");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_show() {
        let result = show(&Config::default()).await;
        assert!(result.is_ok());
    }
}
