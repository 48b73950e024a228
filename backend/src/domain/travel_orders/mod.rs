//! Travel order domain: dates, statuses, the order aggregate, overlap
//! detection, list filters and input validation.
//!
//! Everything here is pure. Persistence and delivery live behind the ports in
//! [`crate::domain::ports`].

mod conflicts;
mod date_range;
mod filter;
mod notification;
mod order;
mod status;
mod validation;

pub use conflicts::find_conflicts;
pub use date_range::{DateRange, DateRangeError};
pub use filter::{TravelOrderFilter, TravelOrderFilterInput};
pub use notification::{NotificationMessage, TravelOrderStatusEvent};
pub use order::{
    DESTINATION_MAX_CHARS, Destination, DestinationError, TravelOrder, TravelOrderDraft,
    TravelOrderId, TravelOrderValidationError,
};
pub use status::{ParseTravelOrderStatusError, StatusTransitionError, TravelOrderStatus};
pub use validation::{
    CreationPolicy, DATE_FORMAT, FieldErrors, NewTravelOrderInput, ValidatedTravelOrder,
    parse_date, parse_requested_status, validate_new_order, validate_trip_dates,
};
