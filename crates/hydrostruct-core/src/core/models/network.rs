use super::branch::{Branch, BranchFeature, CompositeStructure};
use super::ids::{BranchId, CompositeId, StructureId};
use super::structure::Structure;
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashMap;

/// The live hydraulic network that structures are imported into.
///
/// Branches, composites and structures are stored in slot maps, so their ids stay valid for
/// as long as the item exists. A structure id is the identity of a structure: updating a
/// structure in place keeps its id, which is what other parts of a host model refer to.
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Primary storage for branches.
    branches: SlotMap<BranchId, Branch>,
    /// Primary storage for composite structures.
    composites: SlotMap<CompositeId, CompositeStructure>,
    /// Primary storage for structure instances.
    structures: SlotMap<StructureId, Structure>,
    /// Composite that currently owns each structure.
    structure_parent: SecondaryMap<StructureId, CompositeId>,
    /// Lookup map for finding branches by name.
    branch_name_map: HashMap<String, BranchId>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a branch, or returns the id of the existing branch with the same name.
    pub fn add_branch(&mut self, branch: Branch) -> BranchId {
        if let Some(&id) = self.branch_name_map.get(&branch.name) {
            return id;
        }
        let name = branch.name.clone();
        let id = self.branches.insert(branch);
        self.branch_name_map.insert(name, id);
        id
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id)
    }

    pub fn find_branch(&self, name: &str) -> Option<BranchId> {
        self.branch_name_map.get(name).copied()
    }

    pub fn branches_iter(&self) -> impl Iterator<Item = (BranchId, &Branch)> {
        self.branches.iter()
    }

    pub fn composite(&self, id: CompositeId) -> Option<&CompositeStructure> {
        self.composites.get(id)
    }

    /// Composites attached to a branch, in feature order.
    pub fn composites_on_branch(&self, branch_id: BranchId) -> Vec<CompositeId> {
        self.branches
            .get(branch_id)
            .map(|branch| {
                branch
                    .features
                    .iter()
                    .filter_map(|feature| match feature {
                        BranchFeature::Composite(id) => Some(*id),
                        BranchFeature::Structure(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn structure(&self, id: StructureId) -> Option<&Structure> {
        self.structures.get(id)
    }

    pub fn structure_mut(&mut self, id: StructureId) -> Option<&mut Structure> {
        self.structures.get_mut(id)
    }

    pub fn structures_iter(&self) -> impl Iterator<Item = (StructureId, &Structure)> {
        self.structures.iter()
    }

    pub fn structure_ids(&self) -> Vec<StructureId> {
        self.structures.keys().collect()
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn composite_count(&self) -> usize {
        self.composites.len()
    }

    /// The composite that currently owns a structure.
    pub fn parent_of(&self, id: StructureId) -> Option<CompositeId> {
        self.structure_parent.get(id).copied()
    }

    /// Creates an empty composite on a branch.
    ///
    /// Returns `None` if the branch does not exist.
    pub fn add_composite(
        &mut self,
        branch_id: BranchId,
        chainage: f64,
        name: &str,
        long_name: &str,
    ) -> Option<CompositeId> {
        let branch = self.branches.get_mut(branch_id)?;
        let id = self
            .composites
            .insert(CompositeStructure::new(name, long_name, branch_id, chainage));
        branch.features.push(BranchFeature::Composite(id));
        Some(id)
    }

    /// Removes a composite from its branch, together with any structures it still owns.
    pub fn remove_composite(&mut self, id: CompositeId) -> Option<CompositeStructure> {
        let composite = self.composites.remove(id)?;

        // 1. Remove the owned structures
        for &structure_id in &composite.structures {
            self.structures.remove(structure_id);
            self.structure_parent.remove(structure_id);
        }

        // 2. Remove the composite and its structures from the branch features
        if let Some(branch) = self.branches.get_mut(composite.branch) {
            branch.features.retain(|feature| match feature {
                BranchFeature::Composite(cid) => *cid != id,
                BranchFeature::Structure(sid) => !composite.structures.contains(sid),
            });
        }

        Some(composite)
    }

    /// Inserts a new structure into a composite.
    ///
    /// Returns `None` if the composite does not exist.
    pub fn add_structure_to_composite(
        &mut self,
        composite_id: CompositeId,
        structure: Structure,
    ) -> Option<StructureId> {
        if !self.composites.contains_key(composite_id) {
            return None;
        }
        let id = self.structures.insert(structure);
        self.link(id, composite_id);
        Some(id)
    }

    /// Attaches a detached structure to a composite.
    ///
    /// Returns `None` if either id is unknown or the structure still has a parent.
    pub fn attach_structure(&mut self, id: StructureId, composite_id: CompositeId) -> Option<()> {
        if !self.structures.contains_key(id)
            || !self.composites.contains_key(composite_id)
            || self.structure_parent.contains_key(id)
        {
            return None;
        }
        self.link(id, composite_id);
        Some(())
    }

    /// Detaches a structure from its composite and branch, keeping it in the network.
    ///
    /// Returns the composite it was detached from.
    pub fn detach_structure(&mut self, id: StructureId) -> Option<CompositeId> {
        let composite_id = self.structure_parent.remove(id)?;
        if let Some(composite) = self.composites.get_mut(composite_id) {
            composite.structures.retain(|&sid| sid != id);
            if let Some(branch) = self.branches.get_mut(composite.branch) {
                branch
                    .features
                    .retain(|feature| *feature != BranchFeature::Structure(id));
            }
        }
        Some(composite_id)
    }

    fn link(&mut self, id: StructureId, composite_id: CompositeId) {
        let composite = &mut self.composites[composite_id];
        composite.structures.push(id);
        if let Some(branch) = self.branches.get_mut(composite.branch) {
            branch.features.push(BranchFeature::Structure(id));
        }
        self.structure_parent.insert(id, composite_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::{Pump, Weir};

    fn weir(name: &str) -> Structure {
        Structure::Weir(Weir {
            name: name.to_string(),
            ..Weir::default()
        })
    }

    fn network_with_branch() -> (Network, BranchId) {
        let mut network = Network::new();
        let branch = network.add_branch(Branch::channel("B1", 100.0));
        (network, branch)
    }

    #[test]
    fn add_branch_is_idempotent_by_name() {
        let mut network = Network::new();
        let first = network.add_branch(Branch::channel("B1", 100.0));
        let second = network.add_branch(Branch::channel("B1", 50.0));
        assert_eq!(first, second);
        assert_eq!(network.branch(first).unwrap().length, 100.0);
        assert_eq!(network.find_branch("B1"), Some(first));
        assert_eq!(network.find_branch("B2"), None);
    }

    #[test]
    fn add_composite_registers_feature_on_branch() {
        let (mut network, branch) = network_with_branch();
        let composite = network.add_composite(branch, 25.0, "C1", "Composite").unwrap();

        assert_eq!(
            network.branch(branch).unwrap().features(),
            &[BranchFeature::Composite(composite)]
        );
        assert_eq!(network.composite(composite).unwrap().chainage, 25.0);
        assert_eq!(network.composites_on_branch(branch), vec![composite]);
    }

    #[test]
    fn add_composite_fails_for_unknown_branch() {
        let (mut network, _) = network_with_branch();
        assert!(network.add_composite(BranchId::default(), 0.0, "C", "").is_none());
        assert_eq!(network.composite_count(), 0);
    }

    #[test]
    fn structures_are_linked_to_composite_and_branch() {
        let (mut network, branch) = network_with_branch();
        let composite = network.add_composite(branch, 10.0, "C1", "").unwrap();
        let id = network.add_structure_to_composite(composite, weir("W1")).unwrap();

        assert_eq!(network.parent_of(id), Some(composite));
        assert_eq!(network.composite(composite).unwrap().structures(), &[id]);
        assert!(network
            .branch(branch)
            .unwrap()
            .features()
            .contains(&BranchFeature::Structure(id)));
    }

    #[test]
    fn detach_and_attach_move_structure_between_composites() {
        let (mut network, branch) = network_with_branch();
        let first = network.add_composite(branch, 10.0, "C1", "").unwrap();
        let second = network.add_composite(branch, 20.0, "C2", "").unwrap();
        let id = network.add_structure_to_composite(first, weir("W1")).unwrap();

        assert_eq!(network.detach_structure(id), Some(first));
        assert!(network.composite(first).unwrap().is_empty());
        assert_eq!(network.parent_of(id), None);
        assert!(network.structure(id).is_some());

        assert_eq!(network.attach_structure(id, second), Some(()));
        assert_eq!(network.parent_of(id), Some(second));
        assert_eq!(network.attach_structure(id, first), None);
    }

    #[test]
    fn remove_composite_removes_owned_structures_and_features() {
        let (mut network, branch) = network_with_branch();
        let composite = network.add_composite(branch, 10.0, "C1", "").unwrap();
        let weir_id = network.add_structure_to_composite(composite, weir("W1")).unwrap();
        let pump_id = network
            .add_structure_to_composite(composite, Structure::Pump(Pump::default()))
            .unwrap();

        let removed = network.remove_composite(composite).unwrap();

        assert_eq!(removed.structures(), &[weir_id, pump_id]);
        assert!(network.structure(weir_id).is_none());
        assert!(network.structure(pump_id).is_none());
        assert!(network.branch(branch).unwrap().features().is_empty());
        assert_eq!(network.composite_count(), 0);
    }
}
