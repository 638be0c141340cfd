//! Interface to the modeling host that owns definitions and instances.
//!
//! The engine only reads host state, with one exception: the notation probe
//! creates a single temporary instance and erases it again.

pub mod memory;

pub use memory::{InMemoryModel, ModelSnapshot};

use crate::error::HostError;
use cutlist_shared::models::{Definition, DefinitionId, Instance, LengthUnit, Placement};

pub trait ModelHost {
    /// All definitions, in host order.
    fn definitions(&self) -> &[Definition];

    fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions().iter().find(|definition| definition.id == id)
    }

    /// Places a new instance of `definition`. The returned instance is already
    /// listed in the definition's instance collection.
    fn add_instance(&mut self, definition: DefinitionId, placement: Placement) -> Result<Instance, HostError>;

    fn erase_instance(&mut self, instance: &Instance) -> Result<(), HostError>;

    /// Renders a length given in inches the way the host shows it to the user.
    fn format_length(&self, inches: f64) -> String;

    fn length_unit(&self) -> LengthUnit;
}

/// True unless the model measures in inches or feet.
pub fn is_metric(host: &dyn ModelHost) -> bool {
    !matches!(host.length_unit(), LengthUnit::Inches | LengthUnit::Feet)
}

pub fn is_in_meters(host: &dyn ModelHost) -> bool {
    host.length_unit() == LengthUnit::Meters
}
