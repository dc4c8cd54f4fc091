use clap::{Parser, Subcommand};

/// Paddock - provisioning and launch tooling for the F1 Analytics dashboard
#[derive(Parser, Debug)]
#[command(name = "paddock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory containing the dashboard (entry point, manifest)
    #[arg(long, short = 'p', global = true, default_value = ".")]
    pub project_dir: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the dashboard runtime: pinned Python, virtual environment, dependencies
    ///
    /// Resolves a Python interpreter for the pin (pyenv preferred, system
    /// fallback), records `.python-version`, creates the venv, and installs
    /// `requirements.txt`. A repeated run with an unchanged manifest is a
    /// fast no-op.
    #[command(name = "setup-env")]
    SetupEnv {
        /// Rebuild the environment even if it is up to date
        #[arg(long, short)]
        force: bool,
    },

    /// Start the dashboard server in the foreground
    ///
    /// Launches `streamlit run` against the entry point using the isolated
    /// environment's binaries. Blocks until the server exits; the exit code
    /// mirrors the server process's.
    Start {
        /// Server port (overrides PADDOCK_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Remove the virtual environment and the version-pin file
    ///
    /// Idempotent: missing targets are not an error. The FastF1 data cache
    /// is untouched; use `paddock cache clear` for that.
    Clean {
        /// Show what would be removed without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect or clear the dashboard's FastF1 data cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Check the environment and report problems without changing anything
    Doctor {
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Report cache location, file count, and size
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete cached API responses (the directory is recreated empty)
    Clear,
}
