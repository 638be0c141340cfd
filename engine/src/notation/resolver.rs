// Reverse lookup from a group instance to the definition that owns it.
//
// Groups carry no back-reference to their definition, so the owner is found by
// walking every definition's instance collection.
use crate::host::ModelHost;
use cutlist_shared::models::{Definition, DefinitionId, Instance, InstanceId};
use std::collections::HashMap;
use tracing::trace;

/// Returns the definition whose instance collection holds `group`, or `None`
/// if no definition lists it (or it is not a group instance).
///
/// Linear in the total number of instances in the model.
pub fn resolve_group_definition<'h>(host: &'h dyn ModelHost, group: &Instance) -> Option<&'h Definition> {
    resolve_group_definition_traced(host, group, false)
}

pub(crate) fn resolve_group_definition_traced<'h>(
    host: &'h dyn ModelHost,
    group: &Instance,
    trace_scan: bool,
) -> Option<&'h Definition> {
    for definition in host.definitions() {
        if trace_scan {
            trace!(
                "Scanning definition '{}' ({} instances)",
                definition.name,
                definition.instances.len()
            );
        }
        let owns = definition
            .instances
            .iter()
            .any(|instance| instance.is_group() && instance.id == group.id);
        if owns {
            return Some(definition);
        }
    }
    None
}

/// Precomputed group-instance owner map, for sessions that resolve repeatedly.
///
/// The index is a snapshot: rebuild it after the host's instances change.
#[derive(Debug, Clone, Default)]
pub struct OwnerIndex {
    owners: HashMap<InstanceId, DefinitionId>,
}

impl OwnerIndex {
    pub fn build(host: &dyn ModelHost) -> Self {
        let mut owners = HashMap::new();
        for definition in host.definitions() {
            for instance in definition.instances.iter().filter(|i| i.is_group()) {
                // First owner wins, matching the scan order of the linear lookup.
                owners.entry(instance.id).or_insert(definition.id);
            }
        }
        OwnerIndex { owners }
    }

    pub fn resolve<'h>(&self, host: &'h dyn ModelHost, group: &Instance) -> Option<&'h Definition> {
        if !group.is_group() {
            return None;
        }
        self.owners.get(&group.id).and_then(|id| host.definition(*id))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
