use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use roadroute::loader::{FileFormat, Options};
use roadroute::protocol::{self, Response};
use roadroute::server::Server;
use roadroute::Point;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] roadroute::loader::Error);

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The path to the road network description
    graph_file: PathBuf,

    /// Format of the road network description
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Print more diagnostic messages (may be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print only errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve route requests until the client sends the shutdown token
    Serve {
        /// Serve over standard input and output instead of named pipes
        #[arg(long)]
        stdio: bool,

        /// Named pipe with incoming requests
        #[arg(long, default_value = "inpipe")]
        inpipe: PathBuf,

        /// Named pipe for outgoing responses
        #[arg(long, default_value = "outpipe")]
        outpipe: PathBuf,
    },

    /// Find a single route and print its waypoints
    Route {
        /// Latitude of the start point
        #[arg(allow_negative_numbers = true)]
        start_lat: f64,

        /// Longitude of the start point
        #[arg(allow_negative_numbers = true)]
        start_lon: f64,

        /// Latitude of the end point
        #[arg(allow_negative_numbers = true)]
        end_lat: f64,

        /// Longitude of the end point
        #[arg(allow_negative_numbers = true)]
        end_lon: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Auto,
    Text,
    Gz,
    Bz2,
}

impl From<Format> for FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => FileFormat::Unknown,
            Format::Text => FileFormat::Text,
            Format::Gz => FileFormat::TextGz,
            Format::Bz2 => FileFormat::TextBz2,
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let g = load_graph(&cli.graph_file, cli.format.into())?;
    log::info!(
        "loaded {} vertices and {} edges from {}",
        g.len(),
        g.edge_count(),
        cli.graph_file.display(),
    );
    let server = Server::new(g)?;

    match cli.command {
        Command::Serve { stdio: true, .. } => {
            server.serve(io::stdin().lock(), io::stdout().lock())?;
        }

        Command::Serve {
            stdio: false,
            inpipe,
            outpipe,
        } => serve_over_pipes(&server, inpipe, outpipe)?,

        Command::Route {
            start_lat,
            start_lon,
            end_lat,
            end_lon,
        } => {
            let response = server.answer(
                parse_position(start_lat, start_lon)?,
                parse_position(end_lat, end_lon)?,
            );
            if response == Response::NoRoute {
                log::warn!("no route between the given points");
            }
            protocol::write_response(&mut io::stdout().lock(), &response)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn serve_over_pipes(
    server: &Server,
    input: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn Error>> {
    let config = roadroute::fifo::PipeConfig { input, output };
    roadroute::fifo::serve(server, &config)?;
    Ok(())
}

#[cfg(not(unix))]
fn serve_over_pipes(_: &Server, _: PathBuf, _: PathBuf) -> Result<(), Box<dyn Error>> {
    Err("named pipes are only supported on unix - use --stdio".into())
}

fn parse_position(lat: f64, lon: f64) -> Result<Point, Box<dyn Error>> {
    Point::try_from_degrees(lat, lon)
        .ok_or_else(|| format!("position out of range: {} {}", lat, lon).into())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    let mut builder = colog::default_builder();
    builder.filter_level(level);
    builder.init();
}

fn load_graph<P: AsRef<Path>>(
    path: P,
    file_format: FileFormat,
) -> Result<roadroute::Graph, GraphLoadError> {
    let mut g = roadroute::Graph::default();
    let options = Options { file_format };
    match roadroute::loader::add_features_from_file(&mut g, &options, path.as_ref()) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
