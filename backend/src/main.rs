//! Car rental server entry-point.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use car_rental::inbound::http::health::HealthState;
use car_rental::inbound::http::session_config::{BuildMode, session_settings_from_env};
use car_rental::outbound::memory::{InMemoryStore, load_car_fixtures};
use car_rental::outbound::password::BcryptPasswordHasher;
use car_rental::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use car_rental::server::{ServerConfig, Storage, create_server};
use car_rental::settings::AppSettings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let hasher = BcryptPasswordHasher::new(settings.bcrypt_cost()).map_err(io::Error::other)?;

    let (storage, health) = match settings.database_url() {
        Some(url) => {
            let pool = connect_postgres(&settings, url).await?;
            let health = HealthState::new().with_pool(pool.clone());
            (Storage::Postgres(pool), health)
        }
        None => (Storage::Memory(seed_memory_store(&settings).await?), HealthState::new()),
    };

    let config =
        ServerConfig::new(session, settings.bind_addr(), storage).with_password_hasher(hasher);
    let server = create_server(web::Data::new(health), config)?;
    server.await
}

async fn connect_postgres(settings: &AppSettings, url: &str) -> io::Result<DbPool> {
    if settings.run_migrations() {
        let applied = run_pending_migrations(url)
            .await
            .map_err(|error| io::Error::other(format!("run migrations: {error}")))?;
        info!(applied, "database migrations applied");
    }
    DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))
}

async fn seed_memory_store(settings: &AppSettings) -> io::Result<Arc<InMemoryStore>> {
    warn!("no database configured; state is kept in memory and lost on restart");
    let store = Arc::new(InMemoryStore::new());
    if let Some(path) = settings.car_fixtures() {
        let cars = load_car_fixtures(path).map_err(io::Error::other)?;
        info!(count = cars.len(), path = %path.display(), "seeded cars");
        store.insert_cars(cars).await;
    }
    Ok(store)
}
