//! CRPS scoring of a simulated ensemble against a realized price path.
//!
//! Pipeline per interval: horizon -> step count -> change series for every
//! path -> one empirical CRPS per increment -> interval subtotal.

pub mod aggregate;
pub mod changes;
pub mod crps;
pub mod intervals;

pub use aggregate::{score_ensemble, score_prices};
pub use changes::{change_series, checked_change_series};
pub use crps::crps_ensemble;
pub use intervals::{interval_steps, resolve_steps};
