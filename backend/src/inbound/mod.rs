//! Inbound adapters translating external requests into domain port calls.
//! Framework details stay at this edge.

pub mod http;
