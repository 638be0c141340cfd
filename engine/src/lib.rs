// Cut-list engine library root

pub mod config;
pub mod data;
pub mod error;
pub mod host;
pub mod notation;

pub use cutlist_shared::utils::{fixed_width_integer, round_to, version};
