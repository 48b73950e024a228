//! The travel order aggregate and its identifiers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

use super::{DateRange, TravelOrderStatus};

/// Maximum destination length, counted in characters.
pub const DESTINATION_MAX_CHARS: usize = 255;

/// Identifier of a travel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelOrderId(Uuid);

impl TravelOrderId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TravelOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TravelOrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Validation errors for [`Destination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DestinationError {
    /// Blank after trimming.
    #[error("destination must not be empty")]
    Empty,
    /// Longer than [`DESTINATION_MAX_CHARS`].
    #[error("destination must be at most {max} characters")]
    TooLong {
        /// Permitted maximum.
        max: usize,
    },
}

/// Where the traveller is going. Trimmed, non-empty, bounded in length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination(String);

impl Destination {
    /// Validate and normalise a destination.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DestinationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DestinationError::Empty);
        }
        if trimmed.chars().count() > DESTINATION_MAX_CHARS {
            return Err(DestinationError::TooLong {
                max: DESTINATION_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Case-insensitive substring test used by list filtering.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Destination> for String {
    fn from(value: Destination) -> Self {
        value.0
    }
}

impl TryFrom<String> for Destination {
    type Error = DestinationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Raised by [`TravelOrder::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TravelOrderValidationError {
    /// `updated_at` precedes `created_at`.
    #[error("travel order cannot be updated before it was created")]
    UpdatedBeforeCreated,
}

/// Input payload for [`TravelOrder::new`].
#[derive(Debug, Clone)]
pub struct TravelOrderDraft {
    pub id: TravelOrderId,
    pub owner_id: UserId,
    pub destination: Destination,
    pub dates: DateRange,
    pub status: TravelOrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A request to travel somewhere between two dates.
///
/// Field-level invariants are carried by the component types
/// ([`Destination`], [`DateRange`], [`TravelOrderStatus`]); the aggregate
/// only adds the timestamp ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelOrder {
    id: TravelOrderId,
    owner_id: UserId,
    destination: Destination,
    dates: DateRange,
    status: TravelOrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TravelOrder {
    /// Build a validated order.
    pub fn new(draft: TravelOrderDraft) -> Result<Self, TravelOrderValidationError> {
        let TravelOrderDraft {
            id,
            owner_id,
            destination,
            dates,
            status,
            created_at,
            updated_at,
        } = draft;
        if updated_at < created_at {
            return Err(TravelOrderValidationError::UpdatedBeforeCreated);
        }
        Ok(Self {
            id,
            owner_id,
            destination,
            dates,
            status,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> TravelOrderId {
        self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn status(&self) -> TravelOrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether this order blocks an overlapping booking by the same owner.
    pub fn conflicts_with(&self, owner_id: &UserId, candidate: &DateRange) -> bool {
        &self.owner_id == owner_id && self.status.is_active() && self.dates.overlaps(candidate)
    }

    /// Copy of the order moved to `status` at `updated_at`.
    ///
    /// The caller is responsible for having checked the transition with
    /// [`TravelOrderStatus::transition_to`].
    pub fn with_status(self, status: TravelOrderStatus, updated_at: DateTime<Utc>) -> Self {
        Self {
            status,
            updated_at: updated_at.max(self.created_at),
            ..self
        }
    }
}
