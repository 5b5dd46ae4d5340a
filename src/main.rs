use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use graphstash::graph::DirectedGraph;
use graphstash::plot::RenderTarget;

#[derive(Parser)]
#[command(name = "graphstash")]
#[command(version)]
#[command(about = "Directed graph container with array-storage persistence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print vertex and edge counts for a stored graph
    Info {
        /// Path of the array-storage file
        file: PathBuf,

        /// Group the graph is stored under
        group: String,
    },
    /// Print the out-degree mapping as JSON
    Degrees {
        /// Path of the array-storage file
        file: PathBuf,

        /// Group the graph is stored under
        group: String,

        /// Print the degree frequency distribution instead of per-vertex degrees
        #[arg(long)]
        histogram: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Render the out-degree histogram as an SVG bar chart
    Plot {
        /// Path of the array-storage file
        file: PathBuf,

        /// Group the graph is stored under
        group: String,

        /// Write the chart here; omit to print the SVG on stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load(file: &Path, group: &str) -> anyhow::Result<DirectedGraph> {
    DirectedGraph::load_from_store(file, group)
        .with_context(|| format!("loading group '{}' from {}", group, file.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file, group } => {
            let graph = load(&file, &group)?;
            graph.print_num_vertices();
            graph.print_num_edges();
        }
        Commands::Degrees {
            file,
            group,
            histogram,
            pretty,
        } => {
            let graph = load(&file, &group)?;
            let value = if histogram {
                serde_json::to_value(graph.out_degree_histogram())?
            } else {
                serde_json::to_value(graph.out_degrees())?
            };
            let json = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                value.to_string()
            };
            println!("{json}");
        }
        Commands::Plot {
            file,
            group,
            output,
        } => {
            let graph = load(&file, &group)?;
            let target = match output {
                Some(path) => RenderTarget::File(path),
                None => RenderTarget::Buffer,
            };
            if let Some(svg) = graph
                .plot_out_degrees(&target)
                .context("rendering out-degree histogram")?
            {
                println!("{svg}");
            }
        }
    }

    Ok(())
}
