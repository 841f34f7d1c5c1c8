//! Command-line front-end over the hub session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use gamehub_hub_games::{GameHub, IconState};
use gamehub_hub_settings::{FolderSelector, Notice, NoticeKind, folder_label};
use gamehub_library::GameRecord;
use serde::Serialize;

use crate::config::HubConfig;
use crate::runtime::ProcessRuntime;

/// Browse and launch LOVE games from a folder.
#[derive(Debug, Parser)]
#[command(name = "gamehub")]
#[command(about = "Browse and launch LOVE games from a folder")]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Remember DIR as the games folder
    Select { dir: PathBuf },

    /// Show the remembered games folder
    Folder,

    /// Scan the games folder, optionally filtered by name
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        query: Vec<String>,
    },

    /// Launch a scanned game by name
    Launch {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Launch a .love file or game folder directly
    Open { path: PathBuf },

    /// Start the runtime without a game
    #[command(name = "nogame")]
    NoGame,
}

/// One row of `list --json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedGame<'a> {
    #[serde(flatten)]
    record: &'a GameRecord,
    icon: Option<[u32; 2]>,
}

/// Runs a parsed command.
pub async fn run(command: Command, config: HubConfig, selector: FolderSelector) -> anyhow::Result<()> {
    match command {
        Command::Select { dir } => {
            let folder = selector.select(&dir)?;
            println!("Games folder: {} ({})", folder_label(&folder), folder.path().display());
        }
        Command::Folder => match selector.current()? {
            Some(folder) => println!("{} ({})", folder_label(&folder), folder.path().display()),
            None => println!("No folder selected. Run `gamehub select <DIR>` first."),
        },
        Command::List { json, query } => {
            let mut hub = scanned_hub(&config, &selector).await?;
            hub.filter(&query.join(" "));
            hub.request_visible_icons();
            hub.run_until_idle().await;
            print_notices(hub.take_notices());

            if json {
                let rows: Vec<ListedGame<'_>> = hub
                    .visible()
                    .iter()
                    .map(|record| ListedGame {
                        record,
                        icon: hub.icon_state(record).icon().map(|i| [i.width(), i.height()]),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_table(&hub);
            }
        }
        Command::Launch { name } => {
            let name = name.join(" ");
            let mut hub = scanned_hub(&config, &selector).await?;
            let result = hub.launch_by_name(&name);
            print_notices(hub.take_notices());
            result.with_context(|| format!("cannot launch `{name}`"))?;
        }
        Command::Open { path } => {
            let mut hub = new_hub(&config);
            let result = hub.open_file(&path);
            print_notices(hub.take_notices());
            result.with_context(|| format!("cannot open {}", path.display()))?;
        }
        Command::NoGame => {
            let mut hub = new_hub(&config);
            let result = hub.launch_without_game();
            print_notices(hub.take_notices());
            result.context("cannot start runtime")?;
        }
    }
    Ok(())
}

fn new_hub(config: &HubConfig) -> GameHub {
    let runtime = ProcessRuntime::new(config.runtime_command.clone(), config.runtime_args.clone());
    GameHub::new(Arc::new(runtime), config.session_options())
}

/// Builds a hub for the remembered folder and waits for its scan.
async fn scanned_hub(config: &HubConfig, selector: &FolderSelector) -> anyhow::Result<GameHub> {
    let Some(folder) = selector.current()? else {
        bail!("no games folder selected; run `gamehub select <DIR>` first");
    };

    let mut hub = new_hub(config);
    hub.set_folder(Some(folder));
    hub.request_scan();
    hub.run_until_idle().await;
    Ok(hub)
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        let level = match notice.kind {
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        };
        eprintln!("[{level}] {}", notice.text);
    }
}

fn print_table(hub: &GameHub) {
    if hub.visible().is_empty() {
        println!("No games found.");
        return;
    }

    let width = hub
        .visible()
        .iter()
        .map(|g| g.name().chars().count())
        .max()
        .unwrap_or(0);

    for record in hub.visible() {
        let icon = match hub.icon_state(record) {
            IconState::Icon(icon) => format!("icon {}x{}", icon.width(), icon.height()),
            IconState::Placeholder(glyph) => format!("{glyph:?}").to_lowercase(),
        };
        let kind = if record.is_directory() { "dir" } else { "love" };
        println!("{:<width$}  {kind:<4}  {icon}", record.name());
    }
}
