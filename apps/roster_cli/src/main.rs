use std::{io::IsTerminal, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, ChurchApiClient, GroupSource, RosterSession, SnapshotSource};
use roster::{DropTarget, ViewState};
use shared::domain::{GroupId, MinistryId};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Small-group roster viewer")]
struct Cli {
    /// Read the group hierarchy from a saved JSON response instead of the API.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    ministry_id: Option<i64>,
    /// Print the rendered view as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List visible groups with their ordered members.
    Show {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// List the distinct group statuses.
    Statuses,
    /// Move a member and print the resulting roster. Omitting --to drops the
    /// member outside any group, which changes nothing.
    Move {
        #[arg(long)]
        from: i64,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        to: Option<i64>,
        #[arg(long, default_value_t = 0)]
        at: usize,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(clap::Args, Debug)]
struct ViewArgs {
    /// Only show groups with this status; repeatable. None means all.
    #[arg(long = "status")]
    statuses: Vec<String>,
    /// Expand every shown group.
    #[arg(long)]
    expand: bool,
}

impl ViewArgs {
    fn apply(&self, state: &mut ViewState) {
        if !self.statuses.is_empty() {
            state.set_status_filter(self.statuses.iter().cloned());
        }
        if self.expand {
            state.expand_all();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.snapshot {
        return run(SnapshotSource::new(path), &cli).await;
    }

    let mut settings = load_settings();
    if let Some(url) = &cli.api_url {
        settings.church_api_url = url.clone();
    }
    if let Some(id) = cli.ministry_id {
        settings.ministry_id = Some(MinistryId(id));
    }
    let client = ChurchApiClient::from_settings(&settings)?;
    run(client, &cli).await
}

async fn run<S: GroupSource>(source: S, cli: &Cli) -> Result<()> {
    let mut session = RosterSession::new(source);
    session
        .try_reload()
        .await
        .context("failed to load groups")?;
    let state = session.state_mut();

    match &cli.command {
        Command::Show { view } => {
            view.apply(state);
        }
        Command::Statuses => {
            for status in state.all_statuses() {
                println!("{}", render::status_label(status));
            }
            return Ok(());
        }
        Command::Move {
            from,
            index,
            to,
            at,
            view,
        } => {
            let destination = to.map(|group| DropTarget {
                group: GroupId(group),
                index: *at,
            });
            match state
                .move_member(GroupId(*from), *index, destination)
                .context("move rejected")?
            {
                Some(person) => info!(%person, from, ?to, at, "member moved"),
                None => info!("no destination given; roster unchanged"),
            }
            view.apply(state);
        }
    }

    let views = state.render();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        let color = std::io::stdout().is_terminal();
        for group in &views {
            print!("{}", render::format_group(group, color));
        }
    }
    Ok(())
}
