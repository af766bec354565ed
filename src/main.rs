// Copyright 2026 Verdia Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use verdia::cli;

#[derive(Parser)]
#[command(
    name = "verdia",
    about = "Verdia — asistente de cuidado de plantas con diagnóstico por IA",
    version,
    after_help = "Run 'verdia <command> --help' for details on each command.\nRun 'verdia' with no command to open the garden."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the saved garden
    Garden {
        #[command(subcommand)]
        action: GardenAction,
    },
    /// Capture a plant photo and diagnose it
    Scan {
        /// Image file to analyze (omit with --camera)
        image: Option<PathBuf>,
        /// Capture from a local camera instead of a file
        #[arg(long)]
        camera: bool,
        /// Camera device (e.g. "/dev/video1")
        #[arg(long)]
        device: Option<String>,
        /// Save the diagnosed plant to the garden
        #[arg(long)]
        save: bool,
        /// Name for the saved plant (defaults to the identified species)
        #[arg(long)]
        name: Option<String>,
        /// Location label for the saved plant
        #[arg(long)]
        location: Option<String>,
    },
    /// Diagnose the most recently captured photo
    Diagnose {
        /// Save the diagnosed plant to the garden
        #[arg(long)]
        save: bool,
        /// Name for the saved plant (defaults to the identified species)
        #[arg(long)]
        name: Option<String>,
        /// Location label for the saved plant
        #[arg(long)]
        location: Option<String>,
    },
    /// Show the daily care tip
    Tip,
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum GardenAction {
    /// List the garden (saved plants, or samples while empty)
    List {
        /// Only plants that need water now
        #[arg(long)]
        needs_water: bool,
        /// Filter by location label
        #[arg(long)]
        location: Option<String>,
        /// Filter by common or scientific name
        #[arg(long)]
        species: Option<String>,
    },
    /// Show one plant in detail
    Show {
        /// Plant identifier
        id: String,
    },
    /// Remove a plant from the garden
    Remove {
        /// Plant identifier
        id: String,
    },
    /// Edit fields of a saved plant
    Edit {
        /// Plant identifier
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New location label
        #[arg(long)]
        location: Option<String>,
        /// New status (healthy, warning, sick)
        #[arg(long)]
        status: Option<String>,
        /// Whether the plant needs water now
        #[arg(long)]
        needs_water: Option<bool>,
        /// Shorthand: mark as freshly watered
        #[arg(long)]
        watered: bool,
        /// New next-watering label (e.g. "En 4 días")
        #[arg(long)]
        next_watering: Option<String>,
    },
    /// Show storage usage of the garden
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli_args.json {
        std::env::set_var("VERDIA_JSON", "1");
    }
    if cli_args.quiet {
        std::env::set_var("VERDIA_QUIET", "1");
    }
    if cli_args.verbose {
        std::env::set_var("VERDIA_VERBOSE", "1");
    }
    if cli_args.no_color {
        std::env::set_var("VERDIA_NO_COLOR", "1");
    }

    let default_level = if cli_args.verbose { "verdia=debug" } else { "verdia=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli_args.command {
        // No subcommand → open the garden, like the app's home screen
        None => cli::garden_cmd::run_list(false, None, None).await,

        Some(Commands::Garden { action }) => match action {
            GardenAction::List {
                needs_water,
                location,
                species,
            } => cli::garden_cmd::run_list(needs_water, location.as_deref(), species.as_deref())
                .await,
            GardenAction::Show { id } => cli::garden_cmd::run_show(&id).await,
            GardenAction::Remove { id } => cli::garden_cmd::run_remove(&id).await,
            GardenAction::Edit {
                id,
                name,
                location,
                status,
                needs_water,
                watered,
                next_watering,
            } => {
                cli::garden_cmd::run_edit(
                    &id,
                    cli::garden_cmd::EditFields {
                        name,
                        location,
                        status,
                        needs_water,
                        next_watering,
                        watered,
                    },
                )
                .await
            }
            GardenAction::Info => cli::garden_cmd::run_info().await,
        },
        Some(Commands::Scan {
            image,
            camera,
            device,
            save,
            name,
            location,
        }) => cli::scan_cmd::run(image, camera, device, save, name, location).await,
        Some(Commands::Diagnose {
            save,
            name,
            location,
        }) => cli::diagnose_cmd::run(save, name, location).await,
        Some(Commands::Tip) => cli::tip_cmd::run().await,
        Some(Commands::Doctor) => cli::doctor::run().await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "verdia", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
