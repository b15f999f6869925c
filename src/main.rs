// ABOUTME: Main entry point for the showoff slide server.
// ABOUTME: Provides the CLI for serving, rendering and exporting slide decks.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory of the slides (holds showoff.json)
    #[arg(long, global = true)]
    slides_root: Option<PathBuf>,

    /// Highlighter bundle location (directory or URL)
    #[arg(long, global = true)]
    shjs: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the deck, presenter view and archive over HTTP
    Serve(ServeArgs),

    /// Render the deck page to an HTML file
    Render(OutputArgs),

    /// Export the deck page and images as a zip archive
    Export(OutputArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Port for the built in webserver
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Args)]
struct OutputArgs {
    /// Path to the output file
    #[arg(short, long)]
    output: PathBuf,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let port = match &cli.command {
        Some(Commands::Serve(args)) => args.port,
        _ => None,
    };
    let config = showoff::Config::from_env().with_overrides(
        cli.slides_root.clone(),
        port,
        cli.shjs.clone(),
    );

    let Some(command) = &cli.command else {
        anyhow::bail!("Missing a subcommand. Valid subcommands are: serve, render, export");
    };

    config.validate()?;
    if let Ok(root) = showoff::utils::get_absolute_path(&config.slides_root) {
        info!("Loading slides from {:?}", root);
    }

    match command {
        Commands::Serve(_) => {
            println!("Starting webserver on http://localhost:{}", config.port);
            println!("Presenter display on http://localhost:{}/p", config.port);
            showoff::serve(&config)?;
        }
        Commands::Render(args) => {
            let deck = showoff::load_deck(&config)?;
            let html_content = showoff::render_deck(&deck);
            showoff::write_html_to_file(&html_content, &args.output)
                .with_context(|| format!("Failed to write {:?}", args.output))?;
            println!("HTML generated successfully: {:?}", args.output);
        }
        Commands::Export(args) => {
            showoff::export_archive(&config, &args.output)
                .with_context(|| format!("Failed to export {:?}", args.output))?;
            println!("Archive generated successfully: {:?}", args.output);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
