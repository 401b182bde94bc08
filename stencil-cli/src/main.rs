use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use stencil_cli::{Assignment, Source, inspect_cmd, render_cmd};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stencil", version, about = "Render and inspect HTML component templates")]
struct Cli {
    /// More logging (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a template, apply --set values and print the result.
    Render {
        #[command(flatten)]
        source: Source,
        /// Variable value as NAME=VALUE, applied in order (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<Assignment>,
        /// Print text content instead of HTML
        #[arg(long)]
        text: bool,
    },
    /// List a template's variables, handles and hashed classes.
    Inspect {
        #[command(flatten)]
        source: Source,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Render { source, set, text } => {
            println!("{}", render_cmd(&source, &set, text)?);
        }
        Commands::Inspect { source } => print!("{}", inspect_cmd(&source)?),
    }
    Ok(())
}
