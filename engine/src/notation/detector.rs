// Decimal notation detection by probing the host's own length rendering.
//
// The host's UI language is not a reliable hint: it falls back to English when
// the host and OS languages differ, while numbers still render with the OS
// separator. Rendering a real bounding-box width through the host is.
use super::resolver::resolve_group_definition_traced;
use crate::config::CutlistSettings;
use crate::error::HostError;
use crate::host::ModelHost;
use cutlist_shared::models::{DecimalNotationState, DefinitionId, Instance, InstanceVariant, Placement, Separator};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

static COMMA_DECIMAL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+,[0-9]+").unwrap());

/// Separator implied by a host-rendered number: `Comma` only when a comma sits
/// between digits.
pub fn separator_in(rendered: &str) -> Separator {
    if COMMA_DECIMAL_PATTERN.is_match(rendered) {
        Separator::Comma
    } else {
        Separator::Dot
    }
}

/// Session-scoped decimal notation cache.
///
/// Create one per session and pass it to every call that needs locale-correct
/// text. The first `detect` probes the host; later calls return the cached
/// answer without touching the host.
#[derive(Debug, Clone)]
pub struct DecimalNotation {
    state: DecimalNotationState,
    fallback: Separator,
    placement: Placement,
    trace_discovery: bool,
}

impl DecimalNotation {
    pub fn new() -> Self {
        Self::with_settings(&CutlistSettings::default())
    }

    pub fn with_settings(settings: &CutlistSettings) -> Self {
        DecimalNotation {
            state: DecimalNotationState::Uninitialized,
            fallback: settings.fallback_separator,
            placement: settings.probe_placement(),
            trace_discovery: settings.diagnostics.component_discovery,
        }
    }

    pub fn state(&self) -> DecimalNotationState {
        self.state
    }

    pub fn is_initialised(&self) -> bool {
        self.state != DecimalNotationState::Uninitialized
    }

    pub fn detect(&mut self, host: &mut dyn ModelHost) -> Separator {
        if let Some(separator) = self.state.separator() {
            return separator;
        }
        let separator = self.probe(host);
        self.state = separator.into();
        separator
    }

    fn probe(&self, host: &mut dyn ModelHost) -> Separator {
        let Some(definition) = host.definitions().first().map(|d| d.id) else {
            warn!("No component definitions; using '{}' as decimal notation", self.fallback);
            return self.fallback;
        };

        let probe = match ProbeInstance::place(host, definition, self.placement) {
            Ok(probe) => probe,
            Err(e) => {
                warn!("Could not place probe instance ({}); using '{}' as decimal notation", e, self.fallback);
                return self.fallback;
            }
        };

        let width = match probe.instance.variant {
            InstanceVariant::Component { definition } => probe.host().definition(definition).map(|d| d.bounds.width()),
            InstanceVariant::Group => {
                debug!("Using bounding box for group");
                resolve_group_definition_traced(probe.host(), &probe.instance, self.trace_discovery)
                    .map(|d| d.bounds.width())
            }
            InstanceVariant::Unrecognized => None,
        };
        let Some(width) = width else {
            warn!("Probe is neither a resolvable component nor group; using '{}' as decimal notation", self.fallback);
            return self.fallback;
        };

        let rendered = probe.host().format_length(width);
        drop(probe);
        debug!("Notation test string = {}", rendered);

        let separator = separator_in(&rendered);
        match separator {
            Separator::Comma => info!("Setting decimal notation to European"),
            Separator::Dot => info!("Setting decimal notation to en-US"),
        }
        separator
    }
}

impl Default for DecimalNotation {
    fn default() -> Self {
        Self::new()
    }
}

/// Temporary instance that is erased from the host when dropped.
struct ProbeInstance<'h> {
    host: &'h mut dyn ModelHost,
    instance: Instance,
}

impl<'h> ProbeInstance<'h> {
    fn place(host: &'h mut dyn ModelHost, definition: DefinitionId, placement: Placement) -> Result<Self, HostError> {
        let instance = host.add_instance(definition, placement)?;
        Ok(ProbeInstance { host, instance })
    }

    fn host(&self) -> &dyn ModelHost {
        &*self.host
    }
}

impl Drop for ProbeInstance<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.host.erase_instance(&self.instance) {
            warn!("Failed to erase probe instance {}: {}", self.instance.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryModel;
    use cutlist_shared::models::{BoundingBox, Definition, InstanceId, LengthUnit};
    use std::cell::Cell;

    /// Wraps an in-memory model and counts every host call.
    struct CountingHost {
        inner: InMemoryModel,
        calls: Cell<usize>,
        adds: usize,
        erases: usize,
        live: Vec<InstanceId>,
        // Hands out instances the inner model never lists.
        detached: Option<InstanceVariant>,
        fail_erase: bool,
    }

    impl CountingHost {
        fn new(inner: InMemoryModel) -> Self {
            CountingHost {
                inner,
                calls: Cell::new(0),
                adds: 0,
                erases: 0,
                live: Vec::new(),
                detached: None,
                fail_erase: false,
            }
        }

        fn tick(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    impl ModelHost for CountingHost {
        fn definitions(&self) -> &[Definition] {
            self.tick();
            self.inner.definitions()
        }

        fn add_instance(&mut self, definition: DefinitionId, placement: Placement) -> Result<Instance, HostError> {
            self.tick();
            self.adds += 1;
            let instance = match self.detached {
                Some(variant) => Instance { id: InstanceId::new(), variant },
                None => self.inner.add_instance(definition, placement)?,
            };
            self.live.push(instance.id);
            Ok(instance)
        }

        fn erase_instance(&mut self, instance: &Instance) -> Result<(), HostError> {
            self.tick();
            self.erases += 1;
            if self.fail_erase {
                return Err(HostError::Rejected("document is read-only".to_string()));
            }
            self.live.retain(|id| *id != instance.id);
            if self.detached.is_none() {
                self.inner.erase_instance(instance)?;
            }
            Ok(())
        }

        fn format_length(&self, inches: f64) -> String {
            self.tick();
            self.inner.format_length(inches)
        }

        fn length_unit(&self) -> LengthUnit {
            self.tick();
            self.inner.length_unit()
        }
    }

    fn model(unit: LengthUnit, separator: Separator, definition: Definition) -> InMemoryModel {
        let mut model = InMemoryModel::new(unit, separator);
        model.add_definition(definition);
        model
    }

    #[test]
    fn test_separator_in_rendered_text() {
        assert_eq!(separator_in("317,5mm"), Separator::Comma);
        assert_eq!(separator_in("~ 12,25 cm"), Separator::Comma);
        assert_eq!(separator_in("12.5\""), Separator::Dot);
        assert_eq!(separator_in("12\""), Separator::Dot);
        assert_eq!(separator_in(",5"), Separator::Dot);
        assert_eq!(separator_in("no digits"), Separator::Dot);
        assert_eq!(separator_in("\u{661},\u{662}"), Separator::Dot);
    }

    #[test]
    fn test_detects_comma_from_component() {
        let mut host = model(
            LengthUnit::Millimeters,
            Separator::Comma,
            Definition::new("Shelf", BoundingBox::new(12.5, 0.75, 10.0)),
        );
        let mut notation = DecimalNotation::new();
        assert_eq!(notation.detect(&mut host), Separator::Comma);
        assert_eq!(notation.state(), DecimalNotationState::Comma);
        assert_eq!(host.created_count(), 1);
        assert_eq!(host.erased_count(), 1);
        assert_eq!(host.instance_count(), 0);
    }

    #[test]
    fn test_detects_dot_from_component() {
        let mut host = model(
            LengthUnit::Inches,
            Separator::Dot,
            Definition::new("Shelf", BoundingBox::new(12.5, 0.75, 10.0)),
        );
        let mut notation = DecimalNotation::new();
        assert_eq!(notation.detect(&mut host), Separator::Dot);
        assert_eq!(host.instance_count(), 0);
    }

    #[test]
    fn test_detects_comma_from_group() {
        let mut host = model(
            LengthUnit::Centimeters,
            Separator::Comma,
            Definition::new_group("Carcass", BoundingBox::new(24.0, 30.0, 12.0)),
        );
        let mut notation = DecimalNotation::new();
        // 24in = 60.96cm
        assert_eq!(notation.detect(&mut host), Separator::Comma);
        assert_eq!(host.created_count(), 1);
        assert_eq!(host.instance_count(), 0);
    }

    #[test]
    fn test_whole_number_width_reads_as_dot() {
        let mut host = model(
            LengthUnit::Inches,
            Separator::Comma,
            Definition::new("Panel", BoundingBox::new(24.0, 48.0, 0.75)),
        );
        let mut notation = DecimalNotation::new();
        assert_eq!(notation.detect(&mut host), Separator::Dot);
    }

    #[test]
    fn test_no_definitions_falls_back_without_mutation() {
        let mut host = CountingHost::new(InMemoryModel::default());
        let mut notation = DecimalNotation::new();
        assert_eq!(notation.detect(&mut host), Separator::Dot);
        assert_eq!(host.adds, 0);
        assert_eq!(host.erases, 0);
        assert!(notation.is_initialised());
    }

    #[test]
    fn test_fallback_separator_from_settings() {
        let settings = CutlistSettings {
            fallback_separator: Separator::Comma,
            ..CutlistSettings::default()
        };
        let mut host = InMemoryModel::default();
        let mut notation = DecimalNotation::with_settings(&settings);
        assert_eq!(notation.detect(&mut host), Separator::Comma);
    }

    #[test]
    fn test_unresolved_group_still_erases_probe() {
        let inner = model(
            LengthUnit::Millimeters,
            Separator::Comma,
            Definition::new_group("Carcass", BoundingBox::new(12.5, 30.0, 12.0)),
        );
        let mut host = CountingHost::new(inner);
        host.detached = Some(InstanceVariant::Group);

        let mut notation = DecimalNotation::new();
        assert_eq!(notation.detect(&mut host), Separator::Dot);
        assert_eq!(host.adds, 1);
        assert_eq!(host.erases, 1);
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_unrecognized_variant_still_erases_probe() {
        let inner = model(
            LengthUnit::Millimeters,
            Separator::Comma,
            Definition::new("Image", BoundingBox::new(12.5, 30.0, 0.0)),
        );
        let mut host = CountingHost::new(inner);
        host.detached = Some(InstanceVariant::Unrecognized);

        let mut notation = DecimalNotation::new();
        assert_eq!(notation.detect(&mut host), Separator::Dot);
        assert_eq!(host.erases, 1);
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_component_with_missing_definition_erases_probe() {
        let inner = model(
            LengthUnit::Millimeters,
            Separator::Comma,
            Definition::new("Shelf", BoundingBox::new(12.5, 0.75, 10.0)),
        );
        let mut host = CountingHost::new(inner);
        host.detached = Some(InstanceVariant::Component { definition: DefinitionId::new() });

        let mut notation = DecimalNotation::new();
        assert_eq!(notation.detect(&mut host), Separator::Dot);
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_erase_failure_is_not_propagated() {
        let inner = model(
            LengthUnit::Millimeters,
            Separator::Comma,
            Definition::new("Shelf", BoundingBox::new(12.5, 0.75, 10.0)),
        );
        let mut host = CountingHost::new(inner);
        host.fail_erase = true;

        let mut notation = DecimalNotation::new();
        assert_eq!(notation.detect(&mut host), Separator::Comma);
        assert_eq!(host.erases, 1);
    }

    #[test]
    fn test_second_detect_makes_no_host_calls() {
        let inner = model(
            LengthUnit::Millimeters,
            Separator::Comma,
            Definition::new("Shelf", BoundingBox::new(12.5, 0.75, 10.0)),
        );
        let mut host = CountingHost::new(inner);
        let mut notation = DecimalNotation::new();

        assert_eq!(notation.detect(&mut host), Separator::Comma);
        let calls_after_first = host.calls.get();
        assert!(calls_after_first > 0);
        assert_eq!(host.adds, 1);
        assert_eq!(host.erases, 1);

        assert_eq!(notation.detect(&mut host), Separator::Comma);
        assert_eq!(host.calls.get(), calls_after_first);
        assert_eq!(host.adds, 1);
    }

    #[test]
    fn test_state_starts_uninitialised() {
        let notation = DecimalNotation::default();
        assert_eq!(notation.state(), DecimalNotationState::Uninitialized);
        assert!(!notation.is_initialised());
    }
}
