use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use syncdeck::aggregate;
use syncdeck::dashboard::Dashboard;
use syncdeck::model::ConsoleConfig;
use syncdeck::reconcile;
use syncdeck::remote::{ApiClient, CreateDocumentRequest, UpdateMetadataRequest};
use syncdeck::store::{self, ConsoleStore};

#[derive(Parser)]
#[command(name = "syncdeck")]
#[command(about = "Operator console for the chat-to-document sync pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show pipeline service status
    Status,

    /// List aggregated channels
    Channels {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Flattened version history, newest first
    History {
        /// Only versions of this document
        #[arg(long)]
        doc: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Summary counters (messages, documents, versions)
    Summary {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the pipeline to process a document immediately
    Trigger { doc_id: String },

    /// Revert a document to a prior version
    Revert {
        doc_id: String,
        /// 1-based position in the fetched version sequence
        positional: u32,
        /// Opaque version token; preferred over the positional number
        #[arg(long)]
        version_id: Option<String>,
        /// Confirm the revert (refused otherwise)
        #[arg(long)]
        yes: bool,
    },

    /// Resynchronize the pipeline's source-folder mapping
    Resync {
        /// Folder to sync (defaults to the configured folder)
        #[arg(long)]
        folder: Option<String>,
    },

    /// Show a document's content and metadata
    Show {
        doc_id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the pipeline's source-folder mapping
    Mapping {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Search documents by name or content
    Search {
        query: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new tracked document
    Create {
        name: String,
        #[arg(long)]
        folder: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a document's metadata
    SetMetadata {
        doc_id: String,
        #[arg(long)]
        name: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Show or change console configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Open the terminal dashboard
    Tui,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Set configuration values
    Set {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        folder: Option<String>,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        fanout: Option<usize>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let store = ConsoleStore::open_default()?;
    let cfg = store.read_config()?;

    match cli.command {
        Commands::Config { command } => handle_config(&store, cfg, command),
        Commands::Tui => {
            let client_id = store::init_identity(&store)?;
            let client = ApiClient::new(cfg.base_url.clone(), Some(client_id.to_string()))?;
            syncdeck::tui::run(client, cfg)
        }
        command => {
            let client_id = store::init_identity(&store)?;
            let client = ApiClient::new(cfg.base_url.clone(), Some(client_id.to_string()))?;
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("build tokio runtime")?;
            rt.block_on(run_command(command, &client, &cfg))
        }
    }
}

async fn run_command(command: Commands, client: &ApiClient, cfg: &ConsoleConfig) -> Result<()> {
    let folder = cfg.folder_id.as_deref();
    let fanout = cfg.fanout();

    match command {
        Commands::Status => {
            let status = client.status().await?;
            println!("{}: {}", status.service, status.message);
        }

        Commands::Channels { json } => {
            let agg = aggregate::aggregate(client, folder, fanout).await?;
            for note in &agg.notes {
                eprintln!("note: {}", note);
            }
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&agg.channels).context("serialize channels")?
                );
            } else {
                for c in &agg.channels {
                    let slack = if c.slack_channel_id.is_empty() {
                        String::new()
                    } else {
                        format!(" slack={}", c.slack_channel_id)
                    };
                    println!(
                        "{} {} versions={} updated {}{}",
                        c.id, c.name, c.action_count, c.last_update, slack
                    );
                }
            }
        }

        Commands::History { doc, json } => {
            let mut dash = load_dashboard(client, folder, fanout).await?;
            if let Some(id) = doc {
                dash.set_filter(id);
            }
            let entries = dash.history();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&entries).context("serialize history")?
                );
            } else {
                for e in &entries {
                    println!(
                        "{} {} v{} ({}) {:+} chars",
                        e.timestamp, e.doc_name, e.positional_version, e.version_id, e.chars_added
                    );
                }
            }
        }

        Commands::Summary { json } => {
            let dash = load_dashboard(client, folder, fanout).await?;
            // The counter endpoint soft-degrades to 0.
            let messages = client
                .message_count(cfg.team_id.as_deref())
                .await
                .unwrap_or(0);
            let summary = dash.summary(messages);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&summary).context("serialize summary")?
                );
            } else {
                println!(
                    "messages={} documents={} versions={}",
                    summary.total_messages, summary.active_documents, summary.total_versions
                );
            }
        }

        Commands::Trigger { doc_id } => {
            let (outcome, _) = reconcile::force_update(client, &doc_id, folder, fanout).await?;
            println!("{}", outcome.message);
        }

        Commands::Revert {
            doc_id,
            positional,
            version_id,
            yes,
        } => {
            if !yes {
                anyhow::bail!(
                    "revert is destructive; re-run with --yes to confirm reverting {} to v{}",
                    doc_id,
                    positional
                );
            }
            let (outcome, _) = reconcile::revert_version(
                client,
                &doc_id,
                positional,
                version_id.as_deref(),
                folder,
                fanout,
            )
            .await?;
            println!("{}", outcome.message);
        }

        Commands::Resync { folder: arg_folder } => {
            let target = arg_folder.as_deref().or(folder);
            let (outcome, agg) = reconcile::resync_folder(client, target, fanout).await?;
            println!("{} ({} channels)", outcome.message, agg.channels.len());
        }

        Commands::Show { doc_id, json } => {
            let resp = client.get_document(&doc_id).await?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&resp).context("serialize document")?
                );
            } else {
                if let Some(meta) = &resp.metadata {
                    println!("name: {}", meta.name.as_deref().unwrap_or("-"));
                    if !meta.tags.is_empty() {
                        println!("tags: {}", meta.tags.join(", "));
                    }
                }
                println!("{}", resp.content);
            }
        }

        Commands::Mapping { json } => {
            let resp = client.get_mapping(folder).await?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&resp).context("serialize mapping")?
                );
            } else {
                for doc in &resp.documents {
                    println!("{} {}", doc.id, doc.name);
                }
                println!("{} document(s) in mapping", resp.count);
            }
        }

        Commands::Search { query, json } => {
            let resp = client.search_documents(&query, folder).await?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&resp.results).context("serialize results")?
                );
            } else {
                for doc in &resp.results {
                    println!("{} {}", doc.id, doc.name);
                }
                println!("{} match(es)", resp.count);
            }
        }

        Commands::Create {
            name,
            folder: arg_folder,
            content,
            tags,
            description,
        } => {
            let req = CreateDocumentRequest {
                name,
                folder_id: arg_folder.or_else(|| cfg.folder_id.clone()),
                initial_content: content,
                tags: tags.map(split_tags),
                description,
            };
            let resp = client.create_document(&req).await?;
            println!("created {} ({})", resp.document.name, resp.document.id);
        }

        Commands::SetMetadata {
            doc_id,
            name,
            tags,
            description,
        } => {
            let req = UpdateMetadataRequest {
                name,
                tags: tags.map(split_tags),
                description,
            };
            let resp = client.update_metadata(&doc_id, &req).await?;
            println!("{}", resp.message);
        }

        // Routed in `run` before the runtime exists; an error beats a panic
        // if that routing ever drifts.
        Commands::Config { .. } | Commands::Tui => {
            anyhow::bail!("command does not run on the API runtime")
        }
    }

    Ok(())
}

async fn load_dashboard(
    client: &ApiClient,
    folder: Option<&str>,
    fanout: usize,
) -> Result<Dashboard> {
    let mut dash = Dashboard::new();
    let generation = dash.begin_refresh();
    let result = aggregate::aggregate(client, folder, fanout).await;
    dash.apply_refresh(generation, result);
    if let Some(err) = &dash.error {
        anyhow::bail!("aggregation failed: {}", err);
    }
    Ok(dash)
}

fn handle_config(store: &ConsoleStore, mut cfg: ConsoleConfig, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&cfg).context("serialize config")?
                );
            } else {
                println!("url: {}", cfg.base_url);
                println!("folder: {}", cfg.folder_id.as_deref().unwrap_or("-"));
                println!("team: {}", cfg.team_id.as_deref().unwrap_or("-"));
                println!("fanout: {}", cfg.fanout());
            }
        }
        ConfigCommands::Set {
            url,
            folder,
            team,
            fanout,
        } => {
            if let Some(url) = url {
                cfg.base_url = url;
            }
            if let Some(folder) = folder {
                cfg.folder_id = if folder.is_empty() { None } else { Some(folder) };
            }
            if let Some(team) = team {
                cfg.team_id = if team.is_empty() { None } else { Some(team) };
            }
            if let Some(fanout) = fanout {
                cfg.fanout_limit = Some(fanout);
            }
            store.write_config(&cfg)?;
            println!("Configuration updated");
        }
    }
    Ok(())
}

fn split_tags(raw: String) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/cli/dispatch_tests.rs"]
mod tests;
