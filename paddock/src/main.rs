mod cli;
mod commands;
mod observability;

use anyhow::Result;
use clap::Parser;
use cli::{CacheAction, Cli, Commands};

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::SetupEnv { force } => {
            commands::setup::cmd_setup(&cli.project_dir, force)?;
        }
        Commands::Start { port } => {
            let exit_code = commands::start::cmd_start(&cli.project_dir, port)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Clean { dry_run } => {
            commands::clean::cmd_clean(&cli.project_dir, dry_run)?;
        }
        Commands::Cache { action } => match action {
            CacheAction::Status { json } => {
                commands::cache::cmd_status(&cli.project_dir, json)?;
            }
            CacheAction::Clear => {
                commands::cache::cmd_clear(&cli.project_dir)?;
            }
        },
        Commands::Doctor { json } => {
            let exit_code = commands::doctor::cmd_doctor(&cli.project_dir, json)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
