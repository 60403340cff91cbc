use anyhow::Context;
use sqlx::SqlitePool;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};
use userdesk_accounts::{DbAccountService, RegistrationForm, UserRole};
use userdesk_config::{load as load_config, AppConfig};
use userdesk_database::initialize_database;
use userdesk_web::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing().context("failed to initialise tracing")?;

    info!("starting userdesk");

    let config = load_config().context("failed to load configuration")?;

    let pool = initialize_database(&config.database)
        .await
        .context("failed to initialise database")?;

    bootstrap_admin(&pool, &config)
        .await
        .context("failed to bootstrap admin account")?;

    let state = AppState::new(pool, &config);
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("userdesk shut down");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = SubscriberBuilder::default()
        .with_max_level(Level::INFO)
        .with_env_filter(env_filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
}

/// Create the configured admin account if it does not exist yet.
/// Self-registration only produces regular accounts, so a fresh deployment
/// needs this to get its first administrator.
async fn bootstrap_admin(pool: &SqlitePool, config: &AppConfig) -> anyhow::Result<()> {
    let (Some(username), Some(password)) = (
        config.bootstrap.admin_username.as_deref(),
        config.bootstrap.admin_password.as_deref(),
    ) else {
        return Ok(());
    };

    let service = DbAccountService::new(pool.clone());

    if service
        .get_user_by_username_ignore_case(username)
        .await
        .map_err(|e| anyhow::anyhow!("admin lookup failed: {e}"))?
        .is_some()
    {
        return Ok(());
    }

    let form = RegistrationForm {
        username: username.to_string(),
        password: password.to_string(),
        repeat_password: password.to_string(),
    };

    let mut account = service
        .create_user(&form)
        .await
        .map_err(|e| anyhow::anyhow!("admin account rejected: {e}"))?;
    account.role = UserRole::Admin;

    let saved = service
        .save_user(account)
        .await
        .map_err(|e| anyhow::anyhow!("admin account not saved: {e}"))?;

    info!(username = %saved.username, "bootstrapped admin account");
    Ok(())
}

fn shutdown_signal() -> impl std::future::Future<Output = ()> {
    async {
        if let Err(error) = signal::ctrl_c().await {
            error!(?error, "failed to listen for shutdown signal");
        }
        info!("shutdown signal received");
    }
}
