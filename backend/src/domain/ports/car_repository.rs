//! Port abstraction for reading car records.
use async_trait::async_trait;

use crate::domain::{Car, CarId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by car repository adapters.
    pub enum CarRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "car repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "car repository query failed: {message}",
    }
}

/// Read access to cars. Availability changes go through
/// [`RentalRepository`](super::RentalRepository) so they stay atomic with the
/// rental writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Fetch a car by identifier.
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, CarRepositoryError>;
}
