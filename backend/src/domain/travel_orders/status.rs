//! Travel order status and the transitions allowed between states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a travel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelOrderStatus {
    /// Submitted and awaiting a decision.
    Requested,
    /// Accepted; may still be cancelled.
    Approved,
    /// Withdrawn. Terminal.
    Cancelled,
}

impl TravelOrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Requested, Self::Approved, Self::Cancelled];

    /// Statuses that block overlapping bookings for the same owner.
    pub const ACTIVE: [Self; 2] = [Self::Requested, Self::Approved];

    /// Stable lowercase name used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether an order in this status takes part in conflict detection.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Whether reaching this status notifies the owner.
    pub fn is_notifiable(self) -> bool {
        matches!(self, Self::Approved | Self::Cancelled)
    }

    /// Check that moving from `self` to `target` is allowed.
    ///
    /// Returns the status to persist.
    pub fn transition_to(self, target: Self) -> Result<Self, StatusTransitionError> {
        match (self, target) {
            (_, Self::Requested) => Err(StatusTransitionError::NotATarget),
            (Self::Approved, Self::Cancelled) => Ok(Self::Cancelled),
            (_, Self::Cancelled) => Err(StatusTransitionError::CancelRequiresApproval),
            (Self::Approved, Self::Approved) => Err(StatusTransitionError::AlreadyApproved),
            (Self::Cancelled, Self::Approved) => Err(StatusTransitionError::CancelledIsFinal),
            (Self::Requested, Self::Approved) => Ok(Self::Approved),
        }
    }
}

impl fmt::Display for TravelOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel order status `{value}`")]
pub struct ParseTravelOrderStatusError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for TravelOrderStatus {
    type Err = ParseTravelOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseTravelOrderStatusError {
                value: s.to_owned(),
            })
    }
}

/// Reasons a status change is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatusTransitionError {
    /// Orders never move back to `requested`.
    #[error("The status must be \"approved\" or \"cancelled\".")]
    NotATarget,
    /// Only approved orders can be cancelled.
    #[error("Only approved orders can be cancelled.")]
    CancelRequiresApproval,
    /// The order is approved already.
    #[error("This request has already been approved.")]
    AlreadyApproved,
    /// Cancelled orders stay cancelled.
    #[error("Cancelled orders cannot be approved.")]
    CancelledIsFinal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use TravelOrderStatus::{Approved, Cancelled, Requested};

    #[rstest]
    #[case(Requested, Approved, Ok(Approved))]
    #[case(Approved, Cancelled, Ok(Cancelled))]
    #[case(Requested, Cancelled, Err(StatusTransitionError::CancelRequiresApproval))]
    #[case(Cancelled, Cancelled, Err(StatusTransitionError::CancelRequiresApproval))]
    #[case(Approved, Approved, Err(StatusTransitionError::AlreadyApproved))]
    #[case(Cancelled, Approved, Err(StatusTransitionError::CancelledIsFinal))]
    #[case(Approved, Requested, Err(StatusTransitionError::NotATarget))]
    #[case(Requested, Requested, Err(StatusTransitionError::NotATarget))]
    fn transition_table(
        #[case] from: TravelOrderStatus,
        #[case] to: TravelOrderStatus,
        #[case] expected: Result<TravelOrderStatus, StatusTransitionError>,
    ) {
        assert_eq!(from.transition_to(to), expected);
    }

    #[rstest]
    fn names_round_trip() {
        for status in TravelOrderStatus::ALL {
            assert_eq!(status.as_str().parse::<TravelOrderStatus>(), Ok(status));
        }
    }

    #[rstest]
    #[case("Approved")]
    #[case("pending")]
    #[case("")]
    fn unknown_names_are_rejected(#[case] raw: &str) {
        assert!(raw.parse::<TravelOrderStatus>().is_err());
    }

    #[rstest]
    fn only_cancelled_is_inactive() {
        assert!(Requested.is_active());
        assert!(Approved.is_active());
        assert!(!Cancelled.is_active());
    }
}
