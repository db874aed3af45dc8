mod commands;

use std::env;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use semnote::core::note::SortField;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "semnote")]
#[command(about = "Local notes with embedding-based semantic search", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Note body, given inline or read from a file
#[derive(Args)]
#[group(multiple = false)]
struct BodyArgs {
    #[arg(long, help = "Note body (markdown)")]
    body: Option<String>,
    #[arg(long, help = "Read the note body from a file")]
    body_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .semnote workspace and a default config
    Init,
    /// Create a note
    Add {
        #[arg(long, short)]
        title: String,
        #[command(flatten)]
        body: BodyArgs,
        #[arg(long, help = "Mark as favorite")]
        favorite: bool,
    },
    /// Edit a note's title or body
    Edit {
        id: String,
        #[arg(long, short)]
        title: Option<String>,
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Print a note
    Show {
        id: String,
        #[arg(long, help = "Read-only shared view (ignores ownership)")]
        shared: bool,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// List notes
    List {
        #[arg(long, help = "Only favorites")]
        favorites: bool,
        #[arg(long, value_enum, default_value_t = SortField::Updated)]
        sort: SortField,
        #[arg(long, help = "Ascending order (default: descending)")]
        asc: bool,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Toggle a note's favorite flag
    Favorite { id: String },
    /// Delete a note
    Delete { id: String },
    /// Rank notes by semantic similarity to a query
    #[command(alias = "ss")]
    Search {
        query: String,
        #[arg(long, short, help = "Limit results")]
        limit: Option<usize>,
        #[arg(long, help = "Only search favorites")]
        favorites: bool,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Import markdown files as notes
    Import {
        dir: PathBuf,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Show workspace status
    Status {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Add {
            title,
            body,
            favorite,
        } => commands::add::run(title, body.body, body.body_file, favorite),
        Commands::Edit { id, title, body } => {
            commands::edit::run(&id, title, body.body, body.body_file)
        }
        Commands::Show { id, shared, json } => commands::show::run(&id, shared, json),
        Commands::List {
            favorites,
            sort,
            asc,
            json,
        } => commands::list::run(favorites, sort, asc, json),
        Commands::Favorite { id } => commands::favorite::run(&id),
        Commands::Delete { id } => commands::delete::run(&id),
        Commands::Search {
            query,
            limit,
            favorites,
            json,
        } => commands::search::run(&query, limit, favorites, json),
        Commands::Import { dir, json } => commands::import::run(&dir, json),
        Commands::Status { json } => commands::status::run(json),
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SEMNOTE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "semnote=debug,warn"
        } else {
            "semnote=warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
