use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use crud_console::binding;
use crud_console::prelude::*;
use crud_console::{Config, Outcome};

/// Run one console action against the products and pets backend.
#[derive(Parser, Debug)]
#[command(name = "crud-console", version, about)]
struct Cli {
    /// Configuration file (defaults to $CRUD_CONSOLE_CONFIG or ./crud-console.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base url, overriding the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// JSON file holding the document between invocations
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Set a field before the action runs
    #[arg(long = "set", value_name = "ELEMENT=VALUE", value_parser = parse_assignment, global = true)]
    set: Vec<(String, String)>,

    /// Print every non-empty field after the action
    #[arg(long, global = true)]
    show_fields: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    CreateProduct,
    RetrieveProduct,
    UpdateProduct,
    DeleteProduct,
    LikeProduct,
    ListProducts {
        /// Criterion to filter by
        #[arg(long, value_enum, default_value_t = ScopeArg::All)]
        by: ScopeArg,
    },
    RetrievePet,
    UpdatePet,
    SearchPets,
    /// Reset every form and the flash area
    Clear,
    /// List the element ids the console binds
    Elements,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeArg {
    All,
    Name,
    Category,
    Price,
}

impl From<ScopeArg> for ListScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::All => ListScope::All,
            ScopeArg::Name => ListScope::Name,
            ScopeArg::Category => ListScope::Category,
            ScopeArg::Price => ListScope::Price,
        }
    }
}

impl Command {
    fn action(self) -> Option<ConsoleAction> {
        let action = match self {
            Command::CreateProduct => ConsoleAction::CreateProduct,
            Command::RetrieveProduct => ConsoleAction::RetrieveProduct,
            Command::UpdateProduct => ConsoleAction::UpdateProduct,
            Command::DeleteProduct => ConsoleAction::DeleteProduct,
            Command::LikeProduct => ConsoleAction::LikeProduct,
            Command::ListProducts { by } => ConsoleAction::ListProducts(by.into()),
            Command::RetrievePet => ConsoleAction::RetrievePet,
            Command::UpdatePet => ConsoleAction::UpdatePet,
            Command::SearchPets => ConsoleAction::SearchPets,
            Command::Clear => ConsoleAction::Clear,
            Command::Elements => return None,
        };
        Some(action)
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((element, value)) if !element.trim().is_empty() => {
            Ok((element.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected ELEMENT=VALUE, got '{}'", raw)),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    Ok(config)
}

fn load_document(state: Option<&Path>, assignments: &[(String, String)]) -> anyhow::Result<InMemoryUi> {
    let mut ui = InMemoryUi::console();

    if let Some(path) = state.filter(|p| p.exists()) {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read state file {}", path.display()))?;
        let saved: InMemoryUi = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse state file {}", path.display()))?;

        for element in ui.merge_known(saved.fields()) {
            log::warn!("⚠️ ignoring unknown element '{}' in {}", element, path.display());
        }
        ui.set_flash(saved.flash());
        ui.set_results(saved.results());
        log::debug!("restored document from {}", path.display());
    }

    let values: BTreeMap<String, String> = assignments.iter().cloned().collect();
    let unknown = ui.merge_known(&values);
    if !unknown.is_empty() {
        bail!("unknown element id(s): {}", unknown.join(", "));
    }

    Ok(ui)
}

fn save_document(path: &Path, ui: &InMemoryUi) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(ui)?;
    fs::write(path, content)
        .with_context(|| format!("failed to write state file {}", path.display()))?;
    log::debug!("saved document to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let action = match cli.command.action() {
        Some(action) => action,
        None => {
            for element in binding::all_elements() {
                println!("{}", element);
            }
            return Ok(());
        }
    };

    let config = load_config(&cli)?;
    let ui = load_document(cli.state.as_deref(), &cli.set)?;
    let previous_results = ui.results().to_string();

    log::info!("🚀 {} via {}", action.description(), config.backend.base_url);
    let client = HttpClient::from_config(&config);
    let mut manager = ConsoleManager::new(ui, client, config.messages.clone());
    let result = manager.perform(action).await;
    let failed_request = matches!(manager.last_outcome(), Some(Outcome::Failure(_)));

    let ui = manager.into_ui();
    if !ui.flash().is_empty() {
        println!("{}", ui.flash());
    }
    if ui.results() != previous_results && !ui.results().is_empty() {
        println!("{}", ui.results());
    }
    if cli.show_fields {
        for (element, value) in ui.fields().iter().filter(|(_, v)| !v.is_empty()) {
            println!("{} = {}", element, value);
        }
    }

    if let Some(path) = &cli.state {
        save_document(path, &ui)?;
    }

    if let Err(e) = result {
        bail!("{} did not complete: {}", action.description(), e);
    }
    if failed_request {
        bail!("{} failed", action.description());
    }
    Ok(())
}
