mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
use repos::Repos;
pub use services::email::{
    EmailMessage, HttpEmailProvider, IEmailProvider, NoopEmailProvider, RecordingEmailProvider,
};
use services::email::provider_from_config;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct BeaconContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email: Arc<dyn IEmailProvider>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl BeaconContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let email = provider_from_config(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            email,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> BeaconContext {
    BeaconContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context backed entirely by in-memory repos, for tests and local
/// experimentation without a database.
pub fn setup_context_inmemory() -> BeaconContext {
    BeaconContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        email: Arc::new(NoopEmailProvider::default()),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
