mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mosaic")]
#[command(about = "Browse plate result exports and build colour-binned mosaics", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List plates found in a results folder
    Scan {
        /// Folder with geom_/moments_/displacements CSV exports
        folder: PathBuf,
    },

    /// Build one mosaic scene and print its legend
    #[command(group(ArgGroup::new("result").required(true).args(["lc", "rsn"])))]
    Scene {
        folder: PathBuf,
        /// Plate key, e.g. Z=-6.15 (case-insensitive)
        plate: String,
        /// Load case of a moment mosaic
        #[arg(long)]
        lc: Option<i32>,
        /// Result set of a displacement mosaic
        #[arg(long)]
        rsn: Option<i32>,
        /// Component: Mx/My/Mxy for moments, Ux/Uy/Uz for displacements
        #[arg(long)]
        field: Option<String>,
        /// Print the whole scene as JSON
        #[arg(long)]
        json: bool,
        /// Also list the bin and colour of every element
        #[arg(long)]
        elements: bool,
    },

    /// Build the moment mosaic of every plate and load case
    Summary {
        folder: PathBuf,
        #[arg(long, default_value = "My")]
        field: String,
    },

    /// Write an export queue with one sheet per dictionary load case
    Queue {
        folder: PathBuf,
        plate: String,
        #[arg(long, default_value = "My")]
        field: String,
        /// Export settings JSON
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print default export settings
    Settings {
        /// Write them to this file instead
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Scan { folder } => commands::scan(&folder),
        Command::Scene {
            folder,
            plate,
            lc,
            rsn,
            field,
            json,
            elements,
        } => commands::scene(&folder, &plate, lc, rsn, field.as_deref(), json, elements),
        Command::Summary { folder, field } => commands::summary(&folder, &field),
        Command::Queue {
            folder,
            plate,
            field,
            settings,
            out,
        } => commands::queue(&folder, &plate, &field, settings.as_deref(), out.as_deref()),
        Command::Settings { write } => commands::settings(write.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
