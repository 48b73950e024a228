//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! validated domain types.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::travel_orders;

/// Row read from the travel_orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = travel_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TravelOrderRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable travel order.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = travel_orders)]
pub(crate) struct NewTravelOrderRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub destination: &'a str,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
