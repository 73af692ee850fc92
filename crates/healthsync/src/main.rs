// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal client for the HealthSync patient/doctor portal.
//!
//! Without a subcommand the binary drops into the interactive shell;
//! subcommands run one screen and exit.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod appointments;
mod auth;
mod booking;
mod dashboard;
mod portal;
mod prompt;
mod records;
mod shell;

use clap::{Parser, Subcommand};
use colored::Colorize;
use healthsync_core::HealthSyncError;

use crate::portal::Portal;

/// Terminal client for the HealthSync patient/doctor portal.
#[derive(Parser, Debug)]
#[command(name = "healthsync", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive triage chat shell (the default).
    Shell,
    /// Sign in to the portal.
    Login {
        /// Username to sign in as; prompted when omitted.
        username: Option<String>,
        /// Sign in as `patient` or `doctor`; prompted when omitted.
        #[arg(long)]
        role: Option<String>,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Create a patient or doctor account.
    Register {
        /// Register as `patient` or `doctor`; prompted when omitted.
        #[arg(long)]
        role: Option<String>,
    },
    /// Show portal statistics.
    Dashboard,
    /// List your appointments.
    Appointments,
    /// Show health records.
    Records {
        /// Patient whose records to show. Doctors must pass this;
        /// patients default to their own.
        #[arg(long)]
        patient: Option<i64>,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match healthsync_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            healthsync_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.log.level);

    if matches!(cli.command, Some(Commands::Config)) {
        match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => fail(&HealthSyncError::Internal(format!(
                "failed to render config: {e}"
            ))),
        }
        return;
    }

    let portal = match Portal::connect(config).await {
        Ok(portal) => portal,
        Err(e) => fail(&e),
    };

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(&portal).await,
        Commands::Login { username, role } => auth::run_login(&portal, username, role).await,
        Commands::Logout => auth::run_logout(&portal).await,
        Commands::Register { role } => auth::run_register(&portal, role).await,
        Commands::Dashboard => dashboard::run_dashboard(&portal).await,
        Commands::Appointments => appointments::run_appointments(&portal).await,
        Commands::Records { patient } => records::run_records(&portal, patient).await,
        Commands::Config => unreachable!("handled before connecting"),
    };

    if let Err(e) = result {
        if e.is_unauthorized() {
            // Prints the expiry notice and removes the stale session.
            portal.expire().await;
            std::process::exit(1);
        }
        fail(&e);
    }
}

fn fail(error: &HealthSyncError) -> ! {
    eprintln!("{}: {error}", "error".red());
    std::process::exit(1)
}

/// Initializes the tracing subscriber with the configured log level.
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("healthsync={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        let config = healthsync_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.api.timeout_secs, 30);
    }
}
