pub mod allowlist;
pub mod contract;
pub mod error;
pub mod msg;
pub mod phases;
pub mod state;
pub mod token;
pub mod utils;
