//! Org Chart CLI
//!
//! Usage:
//!   orgchart [OPTIONS] [FILE]
//!
//! Reads a backend snapshot (JSON) from FILE or stdin and writes the chart
//! as SVG, or its card and connector geometry as JSON, to stdout.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orgchart::{
    compute_chart, render_json, render_svg_with_stylesheet, Filter, LayoutConfig, RenderConfig,
    Snapshot, ViewMode, ViewOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Tree,
    Stack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Rendered chart
    Svg,
    /// Placed cards and connector segments as JSON
    Segments,
}

#[derive(Parser)]
#[command(name = "orgchart")]
#[command(about = "Render an organisation chart from a people/teams snapshot")]
struct Cli {
    /// Snapshot file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Only show this team (its lead, members and their managers)
    #[arg(short, long)]
    team: Option<String>,

    /// Rendering mode
    #[arg(short, long, value_enum, default_value_t = Mode::Tree)]
    mode: Mode,

    /// Hide inactive people and vacancies
    #[arg(long)]
    hide_inactive: bool,

    /// Hide "add member" slots
    #[arg(long)]
    hide_add_slots: bool,

    /// Put all reports of a manager in one row
    #[arg(long)]
    unlimited_row: bool,

    /// Viewport width used to centre the chart
    #[arg(short, long)]
    width: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// List the snapshot's teams and exit
    #[arg(long)]
    list_teams: bool,

    /// Log layout passes and every placed card
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "orgchart=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("Reading snapshot from stdin; pass a FILE or pipe JSON in (see --help)");
    }

    // Read input
    let loaded = match &cli.input {
        Some(path) => Snapshot::from_file(path).map_err(|e| format!("'{}': {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => Snapshot::from_json(&buffer).map_err(|e| e.to_string()),
                Err(e) => Err(format!("Failed to read stdin: {}", e)),
            }
        }
    };
    let snapshot = match loaded {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.list_teams {
        for team in snapshot.teams() {
            let lead = team.lead.as_deref().unwrap_or("-");
            println!(
                "{}\t{}\tlead={}\tmembers={}",
                team.id,
                team.name,
                lead,
                team.members.len()
            );
        }
        return;
    }

    let mut config = RenderConfig::new()
        .with_filter(cli.team.as_deref().map_or(Filter::All, |team| {
            team.parse().unwrap_or(Filter::All)
        }))
        .with_mode(match cli.mode {
            Mode::Tree => ViewMode::Tree,
            Mode::Stack => ViewMode::Stack,
        })
        .with_options(
            ViewOptions::default()
                .with_show_inactive(!cli.hide_inactive)
                .with_add_slots(!cli.hide_add_slots)
                .with_limit_per_row(!cli.unlimited_row),
        )
        .with_layout(LayoutConfig::default().with_viewport_width(cli.width))
        .with_debug(cli.verbose);

    // Load stylesheet
    if let Some(path) = &cli.stylesheet {
        config = match config.with_stylesheet_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        };
    }

    let (hierarchy, layout) = compute_chart(&snapshot, &config);
    match cli.format {
        Format::Svg => {
            println!(
                "{}",
                render_svg_with_stylesheet(&layout, &hierarchy, &config.svg, &config.stylesheet)
            );
        }
        Format::Segments => match render_json(&layout) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}
