use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Character the host uses between whole and fractional digits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Separator {
    #[default]
    Dot,
    Comma,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Comma => ',',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Session-wide notation cache. Leaves `Uninitialized` at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalNotationState {
    #[default]
    Uninitialized,
    Dot,
    Comma,
}

impl DecimalNotationState {
    pub fn separator(self) -> Option<Separator> {
        match self {
            DecimalNotationState::Uninitialized => None,
            DecimalNotationState::Dot => Some(Separator::Dot),
            DecimalNotationState::Comma => Some(Separator::Comma),
        }
    }
}

impl From<Separator> for DecimalNotationState {
    fn from(separator: Separator) -> Self {
        match separator {
            Separator::Dot => DecimalNotationState::Dot,
            Separator::Comma => DecimalNotationState::Comma,
        }
    }
}

// Host unit option codes: 0=inches, 1=feet, 2=mm, 3=cm, 4=m
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Inches,
    Feet,
    Millimeters,
    Centimeters,
    Meters,
}

impl LengthUnit {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LengthUnit::Inches),
            1 => Some(LengthUnit::Feet),
            2 => Some(LengthUnit::Millimeters),
            3 => Some(LengthUnit::Centimeters),
            4 => Some(LengthUnit::Meters),
            _ => None,
        }
    }

    /// Number of this unit in one inch.
    pub fn per_inch(self) -> f64 {
        match self {
            LengthUnit::Inches => 1.0,
            LengthUnit::Feet => 1.0 / 12.0,
            LengthUnit::Millimeters => 25.4,
            LengthUnit::Centimeters => 2.54,
            LengthUnit::Meters => 0.0254,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Inches => "\"",
            LengthUnit::Feet => "'",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Meters => "m",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DefinitionId(pub Uuid);

impl DefinitionId {
    pub fn new() -> Self {
        DefinitionId(Uuid::new_v4())
    }
}

impl Default for DefinitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    pub fn new() -> Self {
        InstanceId(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Axis-aligned bounds, in inches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl BoundingBox {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width, height, depth }
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

/// How an instance relates to its definition. Decided once, when the host
/// hands the instance over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstanceVariant {
    /// Carries its owning definition directly.
    Component { definition: DefinitionId },
    /// Owner must be found by scanning the definitions.
    Group,
    /// Something the host created that is neither of the above.
    Unrecognized,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Instance {
    pub id: InstanceId,
    pub variant: InstanceVariant,
}

impl Instance {
    pub fn component(definition: DefinitionId) -> Self {
        Self {
            id: InstanceId::new(),
            variant: InstanceVariant::Component { definition },
        }
    }

    pub fn group() -> Self {
        Self {
            id: InstanceId::new(),
            variant: InstanceVariant::Group,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.variant, InstanceVariant::Group)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Definition {
    #[serde(default)]
    pub id: DefinitionId,
    pub name: String,
    pub bounds: BoundingBox,
    /// New instances of this definition are groups rather than components.
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub instances: Vec<Instance>,
}

impl Definition {
    pub fn new(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            id: DefinitionId::new(),
            name: name.into(),
            bounds,
            group: false,
            instances: Vec::new(),
        }
    }

    pub fn new_group(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            group: true,
            ..Self::new(name, bounds)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Placement {
    pub origin: [f64; 3],
}

impl Placement {
    pub fn identity() -> Self {
        Self { origin: [0.0; 3] }
    }

    pub fn at(origin: [f64; 3]) -> Self {
        Self { origin }
    }
}

/// One line of a cut list as already-rendered text fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PartRow {
    pub name: String,
    pub quantity: u32,
    pub length: String,
    pub width: String,
    pub thickness: String,
    #[serde(default)]
    pub material: String,
}
