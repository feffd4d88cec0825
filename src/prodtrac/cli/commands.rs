//! # CLI Layer
//!
//! This module is **one possible UI client** for prodtrac. It is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves configuration and builds the API over an `HttpStore`
//! - `handle_*()`: Per-command handlers that call the API and print the result
//!
//! Failed actions come back as `ProdtracError::Action` carrying exactly the
//! text the user should see; `main` prints it and exits with status 1.

use super::render::{render_listing, render_messages, render_product};
use super::setup::{
    print_grouped_help, print_subcommand_help, Cli, Commands, MiscCommands, ProductCommands,
    SessionCommands,
};
use super::shell::{confirm, run_shell, ShellOptions};
use clap::Parser;
use directories::ProjectDirs;
use prodtrac::api::{CmdMessage, ConfigAction, ProdtracApi};
use prodtrac::commands;
use prodtrac::config::{ProdtracConfig, API_URL_ENV};
use prodtrac::draft::{DraftField, FormDraft};
use prodtrac::error::{ProdtracError, Result};
use prodtrac::session::{Session, DELETE_FAILED, FETCH_FAILED, SUBMIT_FAILED};
use prodtrac::store::http::HttpStore;
use prodtrac::view::{SortDirection, ViewState};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Overrides the platform config directory.
const CONFIG_DIR_ENV: &str = "PRODTRAC_CONFIG_DIR";

struct AppContext {
    api: ProdtracApi<HttpStore>,
    config: ProdtracConfig,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_logging(cli.verbose);
    let use_color = init_color(cli.no_color);
    let config_dir = config_dir()?;

    // Config must stay reachable even when the stored URL is broken.
    if let Some(Commands::Misc(MiscCommands::Config { key, value })) = &cli.command {
        return handle_config(&config_dir, key.clone(), value.clone(), use_color);
    }

    let mut ctx = init_context(&cli, config_dir, use_color)?;

    match cli.command {
        Some(Commands::Products(cmd)) => match cmd {
            ProductCommands::List { filter, sort, desc } => {
                let direction = if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                let view = ViewState::new(
                    filter.unwrap_or_default(),
                    sort.unwrap_or_default(),
                    direction,
                );
                handle_list(&ctx, &view)
            }
            ProductCommands::Show { id } => handle_show(&ctx, id),
            ProductCommands::Add {
                id,
                name,
                description,
                price,
                quantity,
            } => {
                let fields = [id, name, description, price, quantity];
                handle_add(&mut ctx, fields)
            }
            ProductCommands::Update {
                id,
                name,
                description,
                price,
                quantity,
            } => {
                let fields = [None, name, description, price, quantity];
                handle_update(&mut ctx, id, fields)
            }
            ProductCommands::Delete { id, yes } => handle_delete(&mut ctx, id, yes),
        },
        Some(Commands::Session(SessionCommands::Shell)) => handle_shell(ctx),
        Some(Commands::Misc(MiscCommands::Health)) => handle_health(&ctx),
        Some(Commands::Misc(MiscCommands::Config { .. })) => Ok(()),
        None => handle_list(&ctx, &ViewState::default()),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("prodtrac=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_color(no_color: bool) -> bool {
    if no_color {
        colored::control::set_override(false);
    }
    !no_color && std::io::stdout().is_terminal()
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "prodtrac", "prodtrac")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ProdtracError::Config("Could not determine config dir".to_string()))
}

fn init_context(cli: &Cli, config_dir: PathBuf, use_color: bool) -> Result<AppContext> {
    let config = ProdtracConfig::load(&config_dir)?
        .resolve(std::env::var(API_URL_ENV).ok(), cli.api_url.clone())?;
    debug!(api_url = %config.api_url, config_dir = %config_dir.display(), "resolved configuration");

    let store = HttpStore::from_config(&config)?;
    let api = ProdtracApi::new(store, config_dir);

    Ok(AppContext {
        api,
        config,
        use_color,
    })
}

/// Wraps a failed action into the text the user sees.
fn action_error(fallback: &'static str) -> impl Fn(ProdtracError) -> ProdtracError {
    move |e| {
        debug!(error = %e, "{}", fallback);
        ProdtracError::Action(e.user_message(fallback))
    }
}

fn print_messages(messages: &[CmdMessage], use_color: bool) {
    print!("{}", render_messages(messages, use_color));
}

fn handle_list(ctx: &AppContext, view: &ViewState) -> Result<()> {
    let result = ctx
        .api
        .list_products(view)
        .map_err(action_error(FETCH_FAILED))?;
    let rows: Vec<_> = result.listed_products.iter().collect();
    print!("{}", render_listing(&rows, result.total, view, ctx.use_color));
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: i64) -> Result<()> {
    let result = ctx.api.get_product(id)?;
    for product in &result.listed_products {
        print!("{}", render_product(product, ctx.use_color));
    }
    Ok(())
}

fn fill_draft(draft: &mut FormDraft, fields: [Option<String>; 5]) -> Result<()> {
    for (field, value) in DraftField::ALL.into_iter().zip(fields) {
        if let Some(value) = value {
            draft.set(field, value)?;
        }
    }
    Ok(())
}

fn handle_add(ctx: &mut AppContext, fields: [Option<String>; 5]) -> Result<()> {
    let mut draft = FormDraft::new();
    fill_draft(&mut draft, fields).map_err(action_error(SUBMIT_FAILED))?;
    let payload = draft.to_payload().map_err(action_error(SUBMIT_FAILED))?;

    let result = ctx
        .api
        .create_product(&payload)
        .map_err(action_error(SUBMIT_FAILED))?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

/// Pre-fills the draft from the stored record, like the edit form does.
fn handle_update(ctx: &mut AppContext, id: i64, fields: [Option<String>; 5]) -> Result<()> {
    let current = ctx
        .api
        .get_product(id)?
        .listed_products
        .into_iter()
        .next()
        .ok_or(ProdtracError::ProductNotFound(id))?;

    let mut draft = FormDraft::from_product(&current);
    fill_draft(&mut draft, fields).map_err(action_error(SUBMIT_FAILED))?;
    let payload = draft.to_payload().map_err(action_error(SUBMIT_FAILED))?;

    let result = ctx
        .api
        .update_product(id, &payload)
        .map_err(action_error(SUBMIT_FAILED))?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: i64, yes: bool) -> Result<()> {
    if !yes && ctx.config.confirm_delete {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        if !confirm(&format!("Delete product {}?", id), &mut input, &mut output)? {
            print_messages(&[CmdMessage::info("Aborted.")], ctx.use_color);
            return Ok(());
        }
    }

    let result = ctx
        .api
        .delete_product(id)
        .map_err(action_error(DELETE_FAILED))?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_health(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.health()?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_shell(ctx: AppContext) -> Result<()> {
    let options = ShellOptions {
        use_color: ctx.use_color,
        confirm_delete: ctx.config.confirm_delete,
    };
    let mut session = Session::new(ctx.api);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_shell(&mut session, &mut input, &mut output, &options)
}

fn handle_config(
    config_dir: &Path,
    key: Option<String>,
    value: Option<String>,
    use_color: bool,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = commands::config::run(config_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            for (key, value) in config.list_all() {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages, use_color);
    Ok(())
}
