//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Travel orders booked by users.
    ///
    /// Active rows of one owner never overlap (exclusion constraint
    /// `travel_orders_no_overlap`).
    travel_orders (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Account that booked the trip.
        owner_id -> Uuid,
        /// Trimmed destination, at most 255 characters.
        destination -> Varchar,
        /// First day of travel.
        departure_date -> Date,
        /// Last day of travel, never before `departure_date`.
        return_date -> Date,
        /// One of `requested`, `approved` or `cancelled`.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
