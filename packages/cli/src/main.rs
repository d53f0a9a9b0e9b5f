mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    import, normalize, props, styles, ImportArgs, NormalizeArgs, PropsArgs, StylesArgs,
};

/// Figdocs CLI - design system documentation tools
#[derive(Parser, Debug)]
#[command(name = "figdocs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Repair a stored documentation document against the schema
    Normalize(NormalizeArgs),

    /// Derive the property table of a component set
    Props(PropsArgs),

    /// Plan which component sets a design system can import
    Import(ImportArgs),

    /// List the published styles of a file
    Styles(StylesArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let result = match cli.command {
        Command::Normalize(args) => normalize(args),
        Command::Props(args) => props(args, &cwd).await,
        Command::Import(args) => import(args, &cwd).await,
        Command::Styles(args) => styles(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
