//! Owner Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Owner UUID
pub type OwnerUuid = TypedUuid<OwnerRecord>;

/// Owner Record
///
/// The account every product, schedule and order belongs to.
#[derive(Debug, Clone)]
pub struct OwnerRecord {
    /// Unique owner identifier.
    pub uuid: OwnerUuid,

    /// Display name of the bakery.
    pub name: String,

    /// Owner creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,

    /// Soft-delete timestamp when deleted.
    pub deleted_at: Option<Timestamp>,
}
