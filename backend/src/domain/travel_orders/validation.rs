//! Per-operation input validation that reports every failing field at once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{DateRange, Destination, DestinationError, TravelOrderStatus};

/// Wire date format accepted for travel dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field name to messages, serialised as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Start an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field collection.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Record a failure against `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Names of the failing fields, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// `Ok(value)` when nothing was recorded, else `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Rules applied when a travel order is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreationPolicy {
    /// Accept departure dates earlier than today (back-office imports).
    pub allow_past_departures: bool,
}

/// Raw creation input exactly as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTravelOrderInput {
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
}

/// Creation input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTravelOrder {
    pub destination: Destination,
    pub dates: DateRange,
}

fn present(raw: Option<&String>) -> Option<&str> {
    raw.map(|value| value.trim()).filter(|value| !value.is_empty())
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn required_date(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: Option<&String>,
) -> Option<NaiveDate> {
    let Some(value) = present(raw) else {
        errors.push(field, format!("The {label} is required."));
        return None;
    };
    let parsed = parse_date(value);
    if parsed.is_none() {
        errors.push(field, format!("The {label} is not a valid date."));
    }
    parsed
}

/// Validate creation input against `policy`, using `today` for the
/// past-departure rule.
pub fn validate_new_order(
    input: &NewTravelOrderInput,
    today: NaiveDate,
    policy: CreationPolicy,
) -> Result<ValidatedTravelOrder, FieldErrors> {
    let mut errors = FieldErrors::new();

    let destination = match Destination::new(input.destination.as_deref().unwrap_or_default()) {
        Ok(destination) => Some(destination),
        Err(DestinationError::Empty) => {
            errors.push("destination", "The destination is required.");
            None
        }
        Err(DestinationError::TooLong { max }) => {
            errors.push(
                "destination",
                format!("The destination may not be greater than {max} characters."),
            );
            None
        }
    };

    let departure = required_date(
        &mut errors,
        "departureDate",
        "departure date",
        input.departure_date.as_ref(),
    );
    if !policy.allow_past_departures && departure.is_some_and(|date| date < today) {
        errors.push("departureDate", "The departure date must be today or later.");
    }

    let return_date = required_date(
        &mut errors,
        "returnDate",
        "return date",
        input.return_date.as_ref(),
    );

    let dates = match (departure, return_date) {
        (Some(start), Some(end)) => match DateRange::new(start, end) {
            Ok(range) => Some(range),
            Err(_) => {
                errors.push(
                    "returnDate",
                    "The return date must be on or after the departure date.",
                );
                None
            }
        },
        _ => None,
    };

    match (destination, dates) {
        (Some(destination), Some(dates)) if errors.is_empty() => {
            Ok(ValidatedTravelOrder { destination, dates })
        }
        _ => Err(errors),
    }
}

/// Validate a required pair of trip dates.
pub fn validate_trip_dates(
    departure_date: Option<&String>,
    return_date: Option<&String>,
) -> Result<DateRange, FieldErrors> {
    let mut errors = FieldErrors::new();
    let start = required_date(&mut errors, "departureDate", "departure date", departure_date);
    let end = required_date(&mut errors, "returnDate", "return date", return_date);
    let (Some(start), Some(end)) = (start, end) else {
        return Err(errors);
    };
    DateRange::new(start, end).map_err(|_| {
        FieldErrors::single(
            "returnDate",
            "The return date must be on or after the departure date.",
        )
    })
}

/// Parse the status requested by a transition.
///
/// Only `approved` and `cancelled` are valid targets.
pub fn parse_requested_status(raw: Option<&str>) -> Result<TravelOrderStatus, FieldErrors> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Err(FieldErrors::single("status", "The status is required."));
    };
    match value.parse::<TravelOrderStatus>() {
        Ok(status @ (TravelOrderStatus::Approved | TravelOrderStatus::Cancelled)) => Ok(status),
        _ => Err(FieldErrors::single(
            "status",
            "The status must be \"approved\" or \"cancelled\".",
        )),
    }
}
