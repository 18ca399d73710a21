use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use nowstay::app::{build_router, AppState};
use nowstay::client::category::CategoryClient;
use nowstay::client::ApiClient;
use nowstay::config::AppConfig;
use nowstay::db::admin_repository::MongoAdminRepository;
use nowstay::db::category_repository::MongoCategoryRepository;
use nowstay::db::info_page_repository::MongoInfoPageRepository;
use nowstay::models::category::{filter_types, partner_property_types};
use nowstay::models::search::SearchParams;
use nowstay::seed::admin::{seed_admin, AdminSeed};
use nowstay::seed::info_pages::seed_info_pages;
use nowstay::storage::client::{S3StorageClient, StorageClient};
use nowstay::storage::media::MediaStore;
use nowstay::storage::staging::UploadStaging;

#[derive(Debug, Parser)]
#[command(name = "nowstay", version, about = "NowStay marketplace backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API server.
    Serve,
    /// Create or reset the super admin account.
    SeedAdmin,
    /// Upsert the static terms / privacy / about / contact pages.
    SeedInfoPages,
    /// Print the search results link for the given form values.
    SearchLink {
        /// Destination typed by the guest.
        #[arg(long, default_value = "")]
        location: String,
        /// Check-in date (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        check_in: Option<chrono::NaiveDate>,
        /// Check-out date (YYYY-MM-DD), defaults to the day after check-in.
        #[arg(long)]
        check_out: Option<chrono::NaiveDate>,
        #[arg(long, default_value_t = 2)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
        #[arg(long, default_value_t = 1)]
        rooms: u32,
        #[arg(long)]
        pet_friendly: bool,
    },
    /// Fetch categories from the marketplace API and print the merged
    /// property type lists as JSON.
    PropertyTypes {
        /// Print the partner onboarding list instead of the home page filter.
        #[arg(long)]
        partner: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nowstay=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let label = match &cli.command {
        Command::Serve => "Server",
        Command::SeedAdmin => "Admin seed",
        Command::SeedInfoPages => "InfoPage seed",
        Command::SearchLink { .. } => "Search link",
        Command::PropertyTypes { .. } => "Property types",
    };

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{label} failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve => serve(AppConfig::from_env()?).await,
        Command::SeedAdmin => run_seed_admin(AppConfig::from_env()?).await,
        Command::SeedInfoPages => run_seed_info_pages(AppConfig::from_env()?).await,
        Command::SearchLink {
            location,
            check_in,
            check_out,
            adults,
            children,
            rooms,
            pet_friendly,
        } => {
            let today = chrono::Local::now().date_naive();
            let mut params = SearchParams::for_date(check_in.unwrap_or(today));
            params.location = location;
            if let Some(check_out) = check_out {
                params.check_out = check_out;
            }
            params.adults = adults;
            params.children = children;
            params.rooms = rooms;
            params.pet_friendly = pet_friendly;
            params.validate(today)?;

            println!("{}", params.search_path());
            Ok(())
        }
        Command::PropertyTypes { partner } => {
            print_property_types(AppConfig::from_env()?, partner).await
        }
    }
}

async fn print_property_types(config: AppConfig, partner: bool) -> anyhow::Result<()> {
    let categories = CategoryClient::new(ApiClient::new(&config.api_base_url)?)
        .fetch_active()
        .await;

    let json = if partner {
        serde_json::to_string_pretty(&partner_property_types(categories))?
    } else {
        serde_json::to_string_pretty(&filter_types(categories))?
    };
    println!("{json}");
    Ok(())
}

async fn connect_database(config: &AppConfig) -> anyhow::Result<mongodb::Database> {
    let client = mongodb::Client::with_uri_str(&config.mongodb_url)
        .await
        .context("Failed to connect to MongoDB")?;
    tracing::info!("Connected to MongoDB");
    Ok(client.database(&config.database))
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting NowStay server...");

    let db = connect_database(&config).await?;

    let storage: Arc<dyn StorageClient> = Arc::new(
        S3StorageClient::connect(config.media_bucket.clone(), config.media_endpoint.as_deref())
            .await,
    );
    tracing::info!("Media storage client initialized for bucket '{}'", config.media_bucket);

    let staging = UploadStaging::new(&config.upload_dir);
    staging.ensure_dir().await?;

    let state = AppState {
        info_page_repo: Arc::new(MongoInfoPageRepository::new(&db)),
        category_source: Arc::new(MongoCategoryRepository::new(&db)),
        media: Arc::new(MediaStore::new(
            storage,
            config.media_root_folder.clone(),
            config.media_public_base_url.clone(),
        )),
        staging,
    };

    let app = build_router(state);

    tracing::info!("Listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_seed_admin(config: AppConfig) -> anyhow::Result<()> {
    let password = config
        .admin_password
        .clone()
        .context("NOWSTAY_ADMIN_PASSWORD is missing")?;
    let db = connect_database(&config).await?;
    let repo = MongoAdminRepository::new(&db);

    seed_admin(
        &repo,
        &AdminSeed {
            email: config.admin_email.clone(),
            password,
        },
    )
    .await?;
    Ok(())
}

async fn run_seed_info_pages(config: AppConfig) -> anyhow::Result<()> {
    let db = connect_database(&config).await?;
    let repo = MongoInfoPageRepository::new(&db);

    seed_info_pages(&repo, Path::new(&config.content_dir)).await?;
    Ok(())
}
