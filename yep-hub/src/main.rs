//! yep-hub (Interview Hub) - unified interview task aggregation
//!
//! Serves the interview command center for the YEP portal: hiring and
//! instructor-readiness interview obligations merged into one role-filtered
//! task list.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use yep_common::config;
use yep_common::db::{init_database, load_setting};
use yep_hub::interviews::HiringPolicy;
use yep_hub::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "yep-hub", about = "YEP Interview Hub service")]
struct Args {
    /// Root folder holding the portal database (overrides YEP_ROOT_FOLDER)
    #[arg(long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting YEP Interview Hub (yep-hub) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), "YEP_ROOT_FOLDER");
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    let policy_raw = load_setting(&pool, "hub_applicant_waiting_stage", "blocked").await?;
    let policy = HiringPolicy::from_setting(&policy_raw);
    info!("Applicant waiting stage policy: {}", policy_raw);

    // Create application state and router
    let state = AppState::new(pool, policy);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:5860").await?;
    info!("yep-hub listening on http://127.0.0.1:5860");
    info!("Health check: http://127.0.0.1:5860/health");

    axum::serve(listener, app).await?;

    Ok(())
}
