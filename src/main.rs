//! Dream Catcher CLI
//!
//! Usage:
//!   dreamcatcher --analyze [--user ID]             # Pattern analysis
//!   dreamcatcher --community                       # Community insights
//!   dreamcatcher --add --title T --description D   # Record a dream
//!   dreamcatcher --list [--search S] [--tag T]     # Gallery
//!   dreamcatcher --serve                           # HTTP API server
//!   dreamcatcher --analyze --json                  # JSON output

use std::path::PathBuf;
use std::process;

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use dreamcatcher::config::{self, Config};
use dreamcatcher::core::{
    gallery, journal, run_server, CommunityAggregator, DreamAnalyzer, DreamRepository,
    JsonFileRepository,
};
use dreamcatcher::types::{DreamCategory, DreamDraft, DreamEntry, GalleryFilter};
use dreamcatcher::{Error, Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "dreamcatcher",
    version = VERSION,
    about = "Dream Catcher - record dreams and discover their patterns",
    long_about = "Dream Catcher keeps a dream journal and analyzes it.\n\n\
                  Modes:\n  \
                  --analyze    Mood trends, recurring themes and insights\n  \
                  --community  Patterns across dreamers who share insights\n  \
                  --add        Record a new dream\n  \
                  --list       Browse the gallery\n  \
                  --serve      HTTP API server\n\n\
                  Trends compare the newer half of the journal with the older half:\n  \
                  increasing  - more present in recent dreams\n  \
                  decreasing  - less present in recent dreams\n  \
                  stable      - equally present"
)]
struct Args {
    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON dream store (overrides config)
    #[arg(long, value_name = "FILE")]
    store: Option<String>,

    /// Do not seed a new store with sample dreams
    #[arg(long)]
    no_seed: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Analyze dream patterns
    #[arg(short, long)]
    analyze: bool,

    /// Community insights
    #[arg(long)]
    community: bool,

    /// Record a new dream
    #[arg(long)]
    add: bool,

    /// Browse the gallery
    #[arg(short, long)]
    list: bool,

    /// Dreamer id (owner for --add, subject for --analyze, viewer for --list)
    #[arg(short, long)]
    user: Option<String>,

    /// Dream title (--add)
    #[arg(long)]
    title: Option<String>,

    /// Dream description (--add)
    #[arg(long)]
    description: Option<String>,

    /// Tags, e.g. "flying, mountains #freedom" (--add)
    #[arg(long)]
    tags: Option<String>,

    /// Emotions, comma-separated (--add)
    #[arg(long)]
    emotions: Option<String>,

    /// Illustration URL (--add)
    #[arg(long)]
    image_url: Option<String>,

    /// Keep the dream out of the public gallery (--add)
    #[arg(long)]
    private: bool,

    /// Contribute to community insights (--add)
    #[arg(long)]
    share: bool,

    /// Search title and description (--list)
    #[arg(long)]
    search: Option<String>,

    /// Required tag, repeatable (--list)
    #[arg(long = "tag")]
    tag_filter: Vec<String>,

    /// Category, repeatable (--list)
    #[arg(long = "category")]
    category_filter: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            process::exit(2);
        }
    };

    init_tracing(&config);

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args, &config).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };
    if let Some(store) = &args.store {
        config.storage.path = store.clone();
    }
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }
    if args.no_seed {
        config.storage.seed_samples = false;
    }
    config::validate(&config)?;
    Ok(config)
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &Args, config: &Config) -> Result<()> {
    let mut repo = JsonFileRepository::open(&config.storage.path, config.storage.seed_samples)?;

    if args.serve {
        run_serve(repo, config).await
    } else if args.add {
        run_add(&mut repo, args)
    } else if args.community {
        run_community(&repo, args)
    } else if args.list {
        run_list(&repo, args)
    } else {
        // Default to analysis if no mode specified
        run_analyze(&repo, args)
    }
}

/// Run HTTP API server
async fn run_serve(repo: JsonFileRepository, config: &Config) -> Result<()> {
    println!();
    println!("{}", format!("  Dream Catcher API v{}", VERSION).bold().magenta());
    println!("  Store: {}", repo.path().display());
    println!();
    println!("  GET   /health              - Health check");
    println!("  GET   /dreams              - Gallery (q, tags, categories, viewer)");
    println!("  POST  /dreams              - Record a dream");
    println!("  GET   /dreams/:id          - Get a dream");
    println!("  PATCH /dreams/:id          - Update a dream");
    println!("  GET   /tags                - Public tags");
    println!("  GET   /users/:id/analysis  - Dreamer analysis");
    println!("  GET   /community/insights  - Community insights");
    println!();

    let addr = config.server.addr.clone();
    run_server(&addr, Box::new(repo)).await.map_err(|source| Error::Io {
        path: PathBuf::from(addr),
        source,
    })
}

/// Record one dream from flags
fn run_add(repo: &mut JsonFileRepository, args: &Args) -> Result<()> {
    let draft = DreamDraft {
        title: args.title.clone().unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        image_url: args.image_url.clone(),
        tags: args.tags.as_deref().map(journal::parse_tag_list).unwrap_or_default(),
        emotions: args
            .emotions
            .as_deref()
            .map(|s| s.split(',').map(str::to_string).collect())
            .unwrap_or_default(),
        user_id: args.user.clone(),
        is_public: !args.private,
        share_insights: args.share,
    };

    let entry = journal::record(draft, Utc::now())?;
    let entry = repo.create(entry)?;
    tracing::info!(id = %entry.id, "dream recorded");

    if args.json {
        print_json(&entry)?;
    } else {
        println!("{} {}", "Recorded".green().bold(), entry.title);
        print_entry(&entry);
    }
    Ok(())
}

/// Pattern analysis of one dreamer, or of the whole journal
fn run_analyze(repo: &JsonFileRepository, args: &Args) -> Result<()> {
    let dreams = match &args.user {
        Some(user) => repo.list_owned(user)?,
        None => repo.list()?,
    };
    let analysis = DreamAnalyzer::new().analyze(&dreams);

    if args.json {
        print_json(&analysis)?;
    } else {
        let subject = args.user.as_deref().unwrap_or("all dreamers");
        println!("{} ({} dreams, {})", "Dream analysis".bold(), dreams.len(), subject);
        println!();
        print!("{}", analysis.to_terminal_string(!args.no_color));
    }
    Ok(())
}

/// Community insights
fn run_community(repo: &JsonFileRepository, args: &Args) -> Result<()> {
    let insights = CommunityAggregator::new().aggregate(&repo.list()?);

    if args.json {
        print_json(&insights)?;
    } else {
        println!("{}", insights.to_terminal_string(!args.no_color));
        println!("All insights are anonymized and aggregated from dreamers who opted to share.");
    }
    Ok(())
}

/// Gallery listing
fn run_list(repo: &JsonFileRepository, args: &Args) -> Result<()> {
    let mut categories = Vec::new();
    for name in &args.category_filter {
        let category = DreamCategory::parse(name).ok_or_else(|| Error::Validation {
            message: format!(
                "Unknown category '{}'. Expected one of: {}",
                name,
                DreamCategory::ALL.map(|c| c.name()).join(", ")
            ),
        })?;
        categories.push(category);
    }

    let filter = GalleryFilter {
        search: args.search.clone(),
        tags: args.tag_filter.clone(),
        categories,
        viewer: args.user.clone(),
    };

    let entries = repo.list()?;
    let found = gallery::filter_entries(&entries, &filter);

    if args.json {
        print_json(&found)?;
    } else if found.is_empty() {
        println!("No dreams match your filters.");
    } else {
        for entry in found {
            print_entry(entry);
        }
    }
    Ok(())
}

fn print_entry(entry: &DreamEntry) {
    let visibility = if entry.is_public { "public" } else { "private" };
    println!(
        "{}  {}  {}",
        entry.created_at.format("%Y-%m-%d").to_string().dimmed(),
        entry.title.bold(),
        format!("[{}]", visibility).dimmed()
    );
    if !entry.emotions.is_empty() {
        println!("    emotions: {}", entry.emotions.join(", ").cyan());
    }
    if !entry.tags.is_empty() {
        println!("    tags:     {}", entry.tags.join(", ").yellow());
    }
    println!("    id:       {}", entry.id);
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(Error::Serialize)?;
    println!("{}", json);
    Ok(())
}
