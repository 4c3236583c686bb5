//! Check command implementation

use crate::config::{DEFAULT_CONFIG_FILE, ProjectConfig};
use anyhow::Result;
use grpcweb_loader_pipeline::{SystemIo, ToolLocator};
use std::path::Path;
use std::sync::Arc;

/// Validate the configuration and locate the configured tools
pub async fn run(config: &ProjectConfig, config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Checking config: {}", path.display()),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            println!("Checking config: {DEFAULT_CONFIG_FILE}")
        }
        None => println!("Checking built-in defaults (no {DEFAULT_CONFIG_FILE})"),
    }

    config.validate()?;

    match &config.options {
        Some(options) => println!(
            "✓ Options: basePath={}, mode={}",
            options.base_path().display(),
            options.mode
        ),
        None => println!("✓ Options: none (pass --base-path)"),
    }
    println!("✓ Log level: {}", config.log_level()?);

    let tools = ToolLocator::new(Arc::new(SystemIo::new()))
        .locate_all(&config.pipeline)
        .await?;
    println!("✓ Compiler: {}", tools.compiler.display());
    println!("✓ Plugin: {}", tools.plugin.display());
    println!(
        "✓ Workspaces: {}/{}*",
        config.pipeline.temp_root().display(),
        config.pipeline.workspace_prefix
    );
    println!("\nConfiguration is valid!");

    Ok(())
}
