pub mod activity;
pub mod finance;
pub mod lead;
pub mod leaderboard;
pub mod payouts;
pub mod policy;
pub mod sale;
pub mod shift;
pub mod snapshot;

pub use lead::Lead;
pub use policy::CompensationPolicy;
pub use sale::Sale;
pub use shift::{Region, Shift};
