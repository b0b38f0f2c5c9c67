//! Owner Data

use crate::domain::owners::records::OwnerUuid;

/// New Owner Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOwner {
    /// UUID to assign to the owner row.
    pub uuid: OwnerUuid,

    /// Display name of the bakery.
    pub name: String,
}
