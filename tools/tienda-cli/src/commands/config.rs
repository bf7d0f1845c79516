//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, API_URL_ENV};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Configuración actual");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("archivo", &path.display().to_string()),
        None => ctx.output.kv("archivo", "(ninguno, valores por defecto)"),
    }

    let api = &ctx.config.api;
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &api.base_url);
    ctx.output.kv("api_prefix", &api.api_prefix);
    ctx.output.kv("timeout_secs", &api.timeout_secs.to_string());
    if let Some(user) = &api.basic_auth_user {
        ctx.output.kv("basic_auth_user", user);
    }
    if std::env::var_os(API_URL_ENV).is_some() {
        ctx.output.debug(&format!("base_url viene de {API_URL_ENV}"));
    }

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);

    ctx.output.info("[catalog]");
    ctx.output.kv("products_file", &ctx.config.catalog.products_file);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("tienda.toml");

    if config_path.exists() && !force {
        bail!(
            "El archivo de configuración ya existe: {}. Usa --force para sobrescribirlo.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Creado: {}", config_path.display()));

    Ok(())
}
