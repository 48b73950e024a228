//! List filters for a user's travel orders.

use chrono::NaiveDate;

use super::validation::{FieldErrors, parse_date};
use super::{TravelOrder, TravelOrderStatus};

/// Raw list query values as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelOrderFilterInput {
    pub status: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
}

/// Validated filters, combined with logical AND.
///
/// The travel window only applies when both of its dates were supplied.
/// Its bounds are kept as given: an order matches when it departs on or
/// before `end` and returns on or after `start`, so a reversed window still
/// selects the orders spanning it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelOrderFilter {
    status: Option<String>,
    destination_contains: Option<String>,
    window: Option<(NaiveDate, NaiveDate)>,
}

fn non_blank(raw: Option<&String>) -> Option<&str> {
    raw.map(String::as_str).filter(|value| !value.trim().is_empty())
}

impl TravelOrderFilter {
    /// Filter matching every order.
    pub fn any() -> Self {
        Self::default()
    }

    /// Validate raw query values.
    ///
    /// `status` is an exact match, so an unknown value yields an empty
    /// listing rather than an error. Dates are only read when both are
    /// present.
    pub fn parse(input: &TravelOrderFilterInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let status = non_blank(input.status.as_ref()).map(|raw| raw.trim().to_owned());
        let destination_contains = non_blank(input.destination.as_ref()).map(str::to_owned);

        let window = match (
            non_blank(input.departure_date.as_ref()),
            non_blank(input.return_date.as_ref()),
        ) {
            (Some(departure), Some(return_date)) => {
                let mut date = |field: &'static str, label: &str, value: &str| {
                    let parsed = parse_date(value);
                    if parsed.is_none() {
                        errors.push(field, format!("The {label} is not a valid date."));
                    }
                    parsed
                };
                let start = date("departureDate", "departure date", departure);
                let end = date("returnDate", "return date", return_date);
                start.zip(end)
            }
            _ => None,
        };

        errors.into_result(Self {
            status,
            destination_contains,
            window,
        })
    }

    /// Restrict to one status.
    pub fn with_status(mut self, status: TravelOrderStatus) -> Self {
        self.status = Some(status.as_str().to_owned());
        self
    }

    /// Restrict to destinations containing `needle`, ignoring case.
    pub fn with_destination(mut self, needle: impl Into<String>) -> Self {
        self.destination_contains = Some(needle.into());
        self
    }

    /// Restrict to orders departing by `end` and returning from `start`.
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.window = Some((start, end));
        self
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn destination_contains(&self) -> Option<&str> {
        self.destination_contains.as_deref()
    }

    /// Raw `(start, end)` window bounds.
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.window
    }

    /// `ILIKE` pattern for the destination filter with wildcards escaped.
    pub fn destination_pattern(&self) -> Option<String> {
        self.destination_contains.as_deref().map(|needle| {
            let mut pattern = String::with_capacity(needle.len() + 2);
            pattern.push('%');
            for ch in needle.chars() {
                if matches!(ch, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }

    /// Whether `order` passes every filter. Ownership is checked separately.
    pub fn matches(&self, order: &TravelOrder) -> bool {
        let status_ok = self
            .status
            .as_deref()
            .is_none_or(|status| order.status().as_str() == status);
        let destination_ok = self
            .destination_contains
            .as_deref()
            .is_none_or(|needle| order.destination().contains_ignore_case(needle));
        let dates = order.dates();
        let window_ok = self
            .window
            .is_none_or(|(start, end)| dates.start() <= end && dates.end() >= start);
        status_ok && destination_ok && window_ok
    }
}
