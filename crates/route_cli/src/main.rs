//! Route CLI
//!
//! Tracking CSV → play list / route plots (SVG)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use route_core::{
    save_svg, PassOutcome, PlayAnnotations, PlayKey, PlotRequest, PocketType, RecordFilter,
    RenderConfig, RouteConcept, RouteKey, RouteMap, RoutePlotter, TrajectoryLoader,
};

#[derive(Parser)]
#[command(name = "route_cli")]
#[command(about = "Assemble and plot NFL player routes from tracking data", long_about = None)]
struct Cli {
    /// Debug-level logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List plays with route counts and ball landing spots
    Plays {
        /// Tracking CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Print as JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Plot every route of one play
    Plot {
        /// Tracking CSV file path
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        game: u64,

        #[arg(long)]
        play: u32,

        /// Only passer and route runners
        #[arg(long, default_value = "false")]
        offense_only: bool,

        /// Output SVG path (default: plots/<game>_<play>.svg)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Render config (JSON or YAML); falls back to ROUTE_RENDER_CONFIG_PATH
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pocket tag (clean / collapsed)
        #[arg(long)]
        pocket: Option<PocketType>,

        /// Blitz tag
        #[arg(long)]
        blitz: Option<bool>,

        /// Route concept tag (mesh, flood, verticals, ...)
        #[arg(long)]
        concept: Option<RouteConcept>,

        /// Pass outcome tag (completion / incompletion / throw-away)
        #[arg(long)]
        outcome: Option<PassOutcome>,
    },

    /// Plot one player's trajectory
    Route {
        /// Tracking CSV file path
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        game: u64,

        #[arg(long)]
        play: u32,

        /// Player nfl_id
        #[arg(long)]
        player: u32,

        /// Output SVG path (default: plots/<game>_<play>_<player>.svg)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Render config (JSON or YAML); falls back to ROUTE_RENDER_CONFIG_PATH
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Plays { csv, json } => {
            let routes = load(&csv, RecordFilter::all(), false)?;
            print_plays(&routes, json)?;
        }

        Commands::Plot {
            csv,
            game,
            play,
            offense_only,
            out,
            config,
            pocket,
            blitz,
            concept,
            outcome,
        } => {
            let play = PlayKey::new(game, play);
            let routes = load(&csv, RecordFilter::play(play), offense_only)?;
            if routes.is_empty() {
                anyhow::bail!("❌ No routes found for {}", play);
            }

            let request = PlotRequest::for_play(&routes, play, offense_only).with_annotations(
                PlayAnnotations { pocket, blitz, route_concept: concept, outcome },
            );

            let plotter = RoutePlotter::new(load_config(config.as_deref())?)?;
            let svg = plotter.render_play(&request)?;

            let out = out.unwrap_or_else(|| default_out(&[game.to_string(), play.play_id.to_string()]));
            save_svg(&out, &svg).with_context(|| format!("Failed to write {}", out.display()))?;

            println!("✅ {} route(s) plotted → {}", request.trajectories.len(), out.display());
        }

        Commands::Route { csv, game, play, player, out, config } => {
            let play = PlayKey::new(game, play);
            let routes = load(&csv, RecordFilter::play(play), false)?;
            let key = RouteKey { play, nfl_id: player };
            let route = routes
                .get(&key)
                .with_context(|| format!("❌ No route found for {}", key))?;

            let plotter = RoutePlotter::new(load_config(config.as_deref())?)?;
            let svg = plotter.render_route(route, Some(play))?;

            let out = out.unwrap_or_else(|| {
                default_out(&[game.to_string(), play.play_id.to_string(), player.to_string()])
            });
            save_svg(&out, &svg).with_context(|| format!("Failed to write {}", out.display()))?;

            println!(
                "✅ {} ({} frames, {:.1} yd) plotted → {}",
                route.label(),
                route.len(),
                route.path_length(),
                out.display()
            );
        }
    }

    Ok(())
}

fn load(csv: &Path, filter: RecordFilter, offense_only: bool) -> Result<RouteMap> {
    let loader = if offense_only {
        TrajectoryLoader::new().offense_only()
    } else {
        TrajectoryLoader::new()
    };
    loader
        .load_csv(csv, &filter)
        .with_context(|| format!("Failed to load tracking data: {}", csv.display()))
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("Failed to load render config: {}", path.display())),
        None => Ok(RenderConfig::from_env()?),
    }
}

fn default_out(parts: &[String]) -> PathBuf {
    PathBuf::from("plots").join(format!("{}.svg", parts.join("_")))
}

fn print_plays(routes: &RouteMap, json: bool) -> Result<()> {
    let plays: Vec<_> = routes.plays().into_iter().filter_map(|p| routes.play(p)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&plays)?);
        return Ok(());
    }

    println!("{:>12} {:>6} {:>8}  ball landing", "game", "play", "players");
    for play in &plays {
        let landing = match play.ball_landing {
            Some(b) => format!("({:.1}, {:.1})", b.position.x, b.position.y),
            None => "-".to_string(),
        };
        println!(
            "{:>12} {:>6} {:>8}  {}",
            play.key.game_id,
            play.key.play_id,
            play.players.len(),
            landing
        );
    }
    println!("\n📄 {} play(s), {} route(s)", plays.len(), routes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plot_args_parse_tags() {
        let cli = Cli::parse_from([
            "route_cli", "plot", "--csv", "week1.csv", "--game", "2023090700", "--play", "101",
            "--pocket", "clean", "--blitz", "true", "--concept", "mesh", "--outcome", "C",
        ]);
        match cli.command {
            Commands::Plot { pocket, blitz, concept, outcome, offense_only, .. } => {
                assert_eq!(pocket, Some(PocketType::Clean));
                assert_eq!(blitz, Some(true));
                assert_eq!(concept, Some(RouteConcept::Mesh));
                assert_eq!(outcome, Some(PassOutcome::Completion));
                assert!(!offense_only);
            }
            _ => panic!("expected plot command"),
        }
    }

    #[test]
    fn test_default_out() {
        let out = default_out(&["2023090700".to_string(), "101".to_string()]);
        assert_eq!(out, PathBuf::from("plots/2023090700_101.svg"));
    }
}
