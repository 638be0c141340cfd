// Decimal notation detection and the group lookup it depends on
pub mod detector;
pub mod resolver;

pub use detector::{separator_in, DecimalNotation};
pub use resolver::{resolve_group_definition, OwnerIndex};
