//! # CLI Layer
//!
//! This module is **one possible UI client** for recall; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Opens the browser
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: convert shell arguments into typed commands via clap
//! 2. **Context Setup**: data dir, config, saved settings, and a spreadsheet-bound API
//! 3. **Dispatch**: route each command to the API facade
//! 4. **Output Formatting**: hand results to `render`
//! 5. **Error Handling**: errors bubble up to `main`, which prints them and exits 1

use super::render::{
    print_messages, render_cards, render_facets, render_status, render_table,
};
use super::setup::{Cli, Commands, CommonFields, CreateCommands, UpdateCommands, ViewArgs};
use anyhow::Result;
use clap::Parser;
use recallapp::api::{self, RecallApi};
use recallapp::client::HttpTransport;
use recallapp::commands::get::KindScope;
use recallapp::config::{resolve_data_dir, RecallConfig};
use recallapp::error::RecallError;
use recallapp::filter::FilterState;
use recallapp::model::{ProjectDraft, ProjectPatch, RecordKind, WikiDraft, WikiPatch};
use recallapp::settings::SettingsStore;
use recallapp::tags::Tags;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RECALL_LOG";

struct AppContext {
    config: RecallConfig,
    settings: SettingsStore,
    data_dir: PathBuf,
}

impl AppContext {
    /// API bound to the saved spreadsheet.
    fn connected_api(&self) -> Result<RecallApi<HttpTransport>> {
        let saved = self.settings.load()?.ok_or(RecallError::NotConnected)?;
        Ok(RecallApi::from_config(
            &self.config,
            saved.spreadsheet_id,
            self.settings.clone(),
        )?)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data.clone())?;
    let ctx = AppContext {
        config: RecallConfig::load(&data_dir)?,
        settings: SettingsStore::new(&data_dir),
        data_dir,
    };
    debug!(data_dir = %ctx.data_dir.display(), api_url = %ctx.config.api_url, "context ready");

    match cli.command {
        None => handle_view(&ctx, ViewArgs::default()),
        Some(Commands::Connect { spreadsheet_id }) => handle_connect(&ctx, spreadsheet_id),
        Some(Commands::Disconnect) => {
            print_messages(&api::disconnect(&ctx.settings)?.messages);
            Ok(())
        }
        Some(Commands::Status) => handle_status(&ctx),
        Some(Commands::View(args)) => handle_view(&ctx, args),
        Some(Commands::Tags) => {
            let result = ctx.connected_api()?.facets()?;
            if let Some(facets) = &result.facets {
                print!("{}", render_facets(facets));
            }
            Ok(())
        }
        Some(Commands::List { kind }) => {
            let kind = RecordKind::from(kind);
            let result = ctx.connected_api()?.list(kind)?;
            print!("{}", render_table(kind, &result.listed_records));
            Ok(())
        }
        Some(Commands::Create { record }) => handle_create(&ctx, record),
        Some(Commands::Update { record }) => handle_update(&ctx, record),
        Some(Commands::Delete { kind, selector }) => {
            let result = ctx.connected_api()?.delete(kind.into(), &selector)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Ask {
            kind,
            selector,
            no_open,
        }) => handle_ask(&ctx, kind.into(), &selector, no_open),
    }
}

/// Logs go to stderr. `RECALL_LOG` takes an `EnvFilter` directive; without it
/// the level is `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_connect(ctx: &AppContext, spreadsheet_id: String) -> Result<()> {
    let api = RecallApi::from_config(&ctx.config, spreadsheet_id, ctx.settings.clone())?;
    let result = api.connect()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = api::status(&ctx.settings)?;
    print!(
        "{}",
        render_status(
            result.settings.as_ref(),
            &ctx.config.api_url,
            &ctx.data_dir.display().to_string()
        )
    );
    Ok(())
}

fn handle_view(ctx: &AppContext, args: ViewArgs) -> Result<()> {
    let api = ctx.connected_api()?;

    let mut filter = FilterState::new();
    if let Some(search) = args.search {
        filter.set_search(search);
    }
    filter.set_tags(args.tags);
    if let Some(project_type) = args.project_type {
        filter.set_type(project_type);
    }
    if let Some(status) = args.status {
        filter.set_status(status);
    }

    let scope = match (args.projects, args.wikis) {
        (true, _) => KindScope::Only(RecordKind::Project),
        (_, true) => KindScope::Only(RecordKind::Wiki),
        _ => KindScope::Both,
    };

    let result = api.view(&filter, scope)?;
    let empty_message = if filter.has_active_filters() {
        "No records match the current filters."
    } else {
        "No records yet. Add one with `recall create`."
    };
    print!("{}", render_cards(&result.listed_records, empty_message));
    Ok(())
}

fn handle_create(ctx: &AppContext, record: CreateCommands) -> Result<()> {
    let api = ctx.connected_api()?;
    let result = match record {
        CreateCommands::Project {
            name,
            project_type,
            status,
            common,
        } => api.create_project(ProjectDraft {
            project_name: name,
            project_type: project_type.unwrap_or_default(),
            status: status.unwrap_or_default(),
            folder_id: common.folder.unwrap_or_default(),
            primary_tags: Tags::parse(common.tags.as_deref().unwrap_or_default()),
            readme_doc_id: common.readme.unwrap_or_default(),
            brief_description: common.description.unwrap_or_default(),
        })?,
        CreateCommands::Wiki { topic, common } => api.create_wiki(WikiDraft {
            topic,
            folder_id: common.folder.unwrap_or_default(),
            primary_tags: Tags::parse(common.tags.as_deref().unwrap_or_default()),
            readme_doc_id: common.readme.unwrap_or_default(),
            brief_description: common.description.unwrap_or_default(),
        })?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &AppContext, record: UpdateCommands) -> Result<()> {
    let api = ctx.connected_api()?;
    let result = match record {
        UpdateCommands::Project {
            selector,
            name,
            project_type,
            status,
            common,
        } => {
            let CommonFields {
                folder,
                tags,
                readme,
                description,
            } = common;
            api.update_project(
                &selector,
                ProjectPatch {
                    project_name: name,
                    project_type,
                    status,
                    folder_id: folder,
                    primary_tags: tags.as_deref().map(Tags::parse),
                    readme_doc_id: readme,
                    brief_description: description,
                },
            )?
        }
        UpdateCommands::Wiki {
            selector,
            topic,
            common,
        } => {
            let CommonFields {
                folder,
                tags,
                readme,
                description,
            } = common;
            api.update_wiki(
                &selector,
                WikiPatch {
                    topic,
                    folder_id: folder,
                    primary_tags: tags.as_deref().map(Tags::parse),
                    readme_doc_id: readme,
                    brief_description: description,
                },
            )?
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_ask(ctx: &AppContext, kind: RecordKind, selector: &str, no_open: bool) -> Result<()> {
    let result = ctx.connected_api()?.ask(kind, selector)?;
    for url in &result.urls {
        println!("{}", url);
        if !no_open {
            if let Err(e) = open::that(url) {
                warn!(error = %e, "could not open browser");
                eprintln!("Could not open a browser; copy the URL above instead.");
            }
        }
    }
    Ok(())
}
