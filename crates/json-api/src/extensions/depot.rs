//! Depot helper extensions.

use std::any::Any;

use bakelink_app::domain::owners::records::OwnerUuid;
use salvo::prelude::{Depot, StatusError};

const OWNER_UUID_DEPOT_KEY: &str = "owner_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the owner the request was authenticated as.
    fn insert_owner_uuid(&mut self, owner: OwnerUuid);

    /// The authenticated owner, or 401 when auth did not run.
    fn owner_uuid_or_401(&self) -> Result<OwnerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_owner_uuid(&mut self, owner: OwnerUuid) {
        self.insert(OWNER_UUID_DEPOT_KEY, owner);
    }

    fn owner_uuid_or_401(&self) -> Result<OwnerUuid, StatusError> {
        self.get::<OwnerUuid>(OWNER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_round_trips_through_depot() {
        let owner = OwnerUuid::new();
        let mut depot = Depot::new();

        depot.insert_owner_uuid(owner);

        assert_eq!(depot.owner_uuid_or_401().ok(), Some(owner));
    }

    #[test]
    fn missing_owner_is_unauthorized() {
        let result = Depot::new().owner_uuid_or_401();

        assert!(
            result.is_err_and(|error| error.code == salvo::http::StatusCode::UNAUTHORIZED),
            "expected 401"
        );
    }
}
