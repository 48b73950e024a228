//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for `cfg(test)` and the `test-support` feature.

mod clock;
mod notifications;

pub use clock::MutableClock;
pub use notifications::{FailingDelivery, ImmediateSleeper, RecordingDelivery, RecordingNotifier};
