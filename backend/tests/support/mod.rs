//! Shared helpers for integration suites that need embedded PostgreSQL.
//!
//! Each suite gets a fresh temporary database on the process-wide cluster,
//! migrated with the crate's embedded migrations. Set `SKIP_TEST_CLUSTER=1`
//! to skip these suites where the cluster cannot start.

use car_rental::domain::{Car, CarId};
use car_rental::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

/// Render a `postgres` error with its SQLSTATE and detail when available.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Returns true when `SKIP_TEST_CLUSTER` is `1`, `true`, or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when the cluster is opted out, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create a temporary database and apply the embedded migrations to it.
pub fn migrated_database(runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("{err:?}"))?;
    let name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    runtime
        .block_on(run_pending_migrations(database.url()))
        .map_err(|err| err.to_string())?;
    Ok(database)
}

/// Insert `car` directly; the service never creates cars itself.
pub fn seed_car(url: &str, car: &Car) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let price = i32::try_from(car.price_per_day()).map_err(|err| err.to_string())?;
    client
        .execute(
            concat!(
                "INSERT INTO cars (id, owner_id, make, model, price_per_day, availability) ",
                "VALUES ($1, $2, $3, $4, $5, $6)"
            ),
            &[
                car.id().as_uuid(),
                car.owner_id().as_uuid(),
                &car.make(),
                &car.model(),
                &price,
                &car.is_available(),
            ],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(())
}

/// Read the stored availability flag of a car.
pub fn car_availability(url: &str, car_id: &CarId) -> Result<bool, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .query_one("SELECT availability FROM cars WHERE id = $1", &[car_id.as_uuid()])
        .map(|row| row.get(0))
        .map_err(|err| format_postgres_error(&err))
}
