use super::error::ImportError;
use crate::core::models::ids::{CompositeId, StructureId};
use crate::core::models::network::Network;
use crate::core::models::structure::Structure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The structure is new and was added to the target composite.
    Inserted(StructureId),
    /// An existing structure of the same family and name took over the new values in place.
    /// `moved` is set when it was relocated into the target composite.
    Updated {
        id: StructureId,
        moved: bool,
        removed_composite: Option<CompositeId>,
    },
}

impl MergeOutcome {
    pub fn id(&self) -> StructureId {
        match self {
            Self::Inserted(id) | Self::Updated { id, .. } => *id,
        }
    }
}

/// Merges a freshly built structure into `target`.
///
/// An entry of `existing` that is still in the network and matches the new structure by family
/// and name is updated in place, so its id survives. If it lives in another composite it is moved
/// over, and its old composite is removed when that leaves it empty. Without a match the new
/// structure is inserted.
pub fn merge_structure(
    network: &mut Network,
    structure: Structure,
    target: CompositeId,
    existing: &[StructureId],
) -> Result<MergeOutcome, ImportError> {
    let family = structure.family();
    let matching = existing.iter().copied().find(|&id| {
        network
            .structure(id)
            .is_some_and(|s| s.family() == family && s.name() == structure.name())
    });

    let Some(id) = matching else {
        let id = network
            .add_structure_to_composite(target, structure)
            .ok_or_else(|| {
                ImportError::Internal(format!("composite {target:?} vanished during merge"))
            })?;
        return Ok(MergeOutcome::Inserted(id));
    };

    if let Some(current) = network.structure_mut(id) {
        current.update_from(&structure);
    }

    let parent = network.parent_of(id);
    if parent == Some(target) {
        return Ok(MergeOutcome::Updated {
            id,
            moved: false,
            removed_composite: None,
        });
    }

    let mut removed_composite = None;
    if let Some(old) = parent {
        network.detach_structure(id);
        if network.composite(old).is_some_and(|c| c.is_empty()) {
            network.remove_composite(old);
            removed_composite = Some(old);
        }
    }
    network.attach_structure(id, target).ok_or_else(|| {
        ImportError::Internal(format!(
            "structure {id:?} could not be attached to composite {target:?}"
        ))
    })?;

    Ok(MergeOutcome::Updated {
        id,
        moved: true,
        removed_composite,
    })
}
