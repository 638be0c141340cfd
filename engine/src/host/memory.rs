// In-process host model, used by the binary and by tests
use super::ModelHost;
use crate::error::{CutlistError, HostError};
use cutlist_shared::models::{
    Definition, DefinitionId, Instance, InstanceId, InstanceVariant, LengthUnit, PartRow, Placement, Separator,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// JSON shape of a saved model.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ModelSnapshot {
    pub unit: LengthUnit,
    pub decimal_separator: Separator,
    pub definitions: Vec<Definition>,
    pub parts: Vec<PartRow>,
}

pub struct InMemoryModel {
    unit: LengthUnit,
    decimal_separator: Separator,
    definitions: Vec<Definition>,
    parts: Vec<PartRow>,
    created: usize,
    erased: usize,
}

impl InMemoryModel {
    pub fn new(unit: LengthUnit, decimal_separator: Separator) -> Self {
        InMemoryModel {
            unit,
            decimal_separator,
            definitions: Vec::new(),
            parts: Vec::new(),
            created: 0,
            erased: 0,
        }
    }

    pub fn from_snapshot(snapshot: ModelSnapshot) -> Self {
        InMemoryModel {
            unit: snapshot.unit,
            decimal_separator: snapshot.decimal_separator,
            definitions: snapshot.definitions,
            parts: snapshot.parts,
            created: 0,
            erased: 0,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, CutlistError> {
        let snapshot: ModelSnapshot = serde_json::from_str(raw)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CutlistError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn add_definition(&mut self, definition: Definition) -> DefinitionId {
        let id = definition.id;
        self.definitions.push(definition);
        id
    }

    pub fn set_length_unit(&mut self, unit: LengthUnit) {
        self.unit = unit;
    }

    pub fn parts(&self) -> &[PartRow] {
        &self.parts
    }

    pub fn instance_count(&self) -> usize {
        self.definitions.iter().map(|d| d.instances.len()).sum()
    }

    /// Instances created through `add_instance` since construction.
    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn erased_count(&self) -> usize {
        self.erased
    }
}

impl Default for InMemoryModel {
    fn default() -> Self {
        Self::new(LengthUnit::Inches, Separator::Dot)
    }
}

impl ModelHost for InMemoryModel {
    fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    fn add_instance(&mut self, definition: DefinitionId, _placement: Placement) -> Result<Instance, HostError> {
        let target = self
            .definitions
            .iter_mut()
            .find(|d| d.id == definition)
            .ok_or(HostError::UnknownDefinition(definition))?;

        let variant = if target.group {
            InstanceVariant::Group
        } else {
            InstanceVariant::Component { definition }
        };
        let instance = Instance { id: InstanceId::new(), variant };
        target.instances.push(instance);
        self.created += 1;
        Ok(instance)
    }

    fn erase_instance(&mut self, instance: &Instance) -> Result<(), HostError> {
        for definition in self.definitions.iter_mut() {
            if let Some(pos) = definition.instances.iter().position(|i| i.id == instance.id) {
                definition.instances.remove(pos);
                self.erased += 1;
                return Ok(());
            }
        }
        Err(HostError::UnknownInstance(instance.id))
    }

    fn format_length(&self, inches: f64) -> String {
        let value = inches * self.unit.per_inch();
        let mut text = format!("{:.3}", value);
        // Drop trailing zeros the way the host does: "12.500" -> "12.5", "12.000" -> "12"
        if text.contains('.') {
            text = text.trim_end_matches('0').trim_end_matches('.').to_string();
        }
        let text = text.replace('.', &self.decimal_separator.to_string());
        format!("{}{}", text, self.unit.suffix())
    }

    fn length_unit(&self) -> LengthUnit {
        self.unit
    }
}
