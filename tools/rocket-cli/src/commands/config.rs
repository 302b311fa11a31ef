//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use rocket_observability::LogFormat;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let api = &ctx.config.api;
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &api.base_url);
    ctx.output.kv("timeout_ms", &api.timeout_ms.to_string());
    ctx.output.kv("connect_timeout_ms", &api.connect_timeout_ms.to_string());
    ctx.output.kv("max_retries", &api.max_retries.to_string());
    ctx.output.kv("retry_backoff_ms", &api.retry_backoff_ms.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);
    ctx.output.kv("resolved", &ctx.storage_path().display().to_string());

    let logging = &ctx.config.logging;
    ctx.output.info("[logging]");
    ctx.output.kv("level", logging.level.as_str());
    ctx.output.kv(
        "format",
        match logging.format {
            LogFormat::Json => "json",
            LogFormat::Human => "human",
        },
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.api() {
        errors.push(format!("api.base_url: {:#}", e));
    }

    let api = &ctx.config.api;
    if api.timeout_ms == 0 {
        errors.push("api.timeout_ms must be greater than 0".to_string());
    }
    if api.connect_timeout_ms > api.timeout_ms {
        warnings.push("api.connect_timeout_ms exceeds api.timeout_ms".to_string());
    }

    if ctx.config.storage.path.trim().is_empty() {
        errors.push("storage.path is required".to_string());
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
