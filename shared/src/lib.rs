pub mod models;
pub mod utils;

// Data model shared by the engine and downstream exporters. Nothing in here
// talks to the host.

pub use utils::{fixed_width_integer, round_to, version};
