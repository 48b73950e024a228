//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed travel order entities, the rules that
//! govern them and the ports through which adapters reach them. Nothing in
//! this module performs I/O directly.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - TraceId: request correlation identifier held in task-local storage.
//! - TravelOrder and friends: the travel order aggregate and its rules.
//! - TravelOrderService: implementation of the travel order driving ports.

pub mod auth;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod travel_order_service;
pub mod travel_orders;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, Principal};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::travel_order_service::{
    MAX_TRANSITION_ATTEMPTS, TravelOrderService, TravelOrderSettings, validation_error,
};
pub use self::travel_orders::*;
pub use self::user::{UserId, UserIdError};
