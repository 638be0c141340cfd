pub mod settings;

pub use settings::{CutlistSettings, DiagnosticSettings};
