//! Privacy Provider - CLI for the plagiarism plugin's privacy requests.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use common::AppResult;
use privacy_provider_lib::config::PrivacyServiceConfig;
use privacy_provider_lib::{run_migrations, run_request, MigrateAction, PrivacyRequest};

#[derive(Parser)]
#[command(name = "privacy-provider")]
#[command(about = "Privacy data provider for the plagiarism plugin")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the personal data declarations
    Metadata,
    /// List the contexts holding data for a user
    Contexts {
        #[arg(long)]
        user: i64,
    },
    /// Export all plagiarism data for a user
    Export {
        #[arg(long)]
        user: i64,
        /// Export directory (defaults to PRIVACY_EXPORT_DIR/user_<id>)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the export as JSON instead of writing files
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Delete all plagiarism data in a course module's context
    DeleteContext {
        /// Course-module id
        #[arg(long)]
        context: i64,
    },
    /// Delete all plagiarism data for a user
    DeleteUser {
        #[arg(long)]
        user: i64,
    },
    /// List the users holding data in a course module's context
    Users {
        /// Course-module id
        #[arg(long)]
        context: i64,
    },
    /// Delete plagiarism data for approved users in a course module's context
    DeleteUsers {
        /// Course-module id
        #[arg(long)]
        context: i64,
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        users: Vec<i64>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Roll back and reapply all plugin migrations
    Refresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = PrivacyServiceConfig::from_env();
    init_tracing(cli.verbose, &config.service.log_level);

    let request = match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Refresh => MigrateAction::Refresh,
            };
            let result = run_migrations(&config, migrate_action).await;
            return report(&config, result);
        }
        Commands::Metadata => PrivacyRequest::Metadata,
        Commands::Contexts { user } => PrivacyRequest::Contexts { userid: user },
        Commands::Export { user, out, stdout } => PrivacyRequest::Export {
            userid: user,
            out,
            stdout,
        },
        Commands::DeleteContext { context } => PrivacyRequest::DeleteContext { cmid: context },
        Commands::DeleteUser { user } => PrivacyRequest::DeleteUser { userid: user },
        Commands::Users { context } => PrivacyRequest::Users { cmid: context },
        Commands::DeleteUsers { context, users } => PrivacyRequest::DeleteUsers {
            cmid: context,
            userids: users,
        },
    };

    let result = run_request(&config, request).await;
    report(&config, result)
}

/// Log a failed command with its error code before returning it
fn report(
    config: &PrivacyServiceConfig,
    result: AppResult<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = &result {
        tracing::error!(
            service = %config.service.service_name,
            code = err.code(),
            error = %err,
            "Command failed"
        );
    }
    Ok(result?)
}

/// Initialize tracing subscriber (verbose mode sets debug level)
fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| log_level.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
