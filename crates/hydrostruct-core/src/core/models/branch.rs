use super::ids::{BranchId, CompositeId, StructureId};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BranchKind {
    #[default]
    Channel,
    SewerConnection {
        internal: bool,
    },
}

/// Cross-section placed on a branch, reduced to what structure placement needs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BranchCrossSection {
    pub chainage: f64,
    pub width: f64,
    /// Lateral position of the left bank.
    pub left_offset: f64,
}

/// A feature attached to a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchFeature {
    Composite(CompositeId),
    Structure(StructureId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub name: String,
    pub length: f64,
    pub kind: BranchKind,
    pub cross_sections: Vec<BranchCrossSection>,
    pub(crate) features: Vec<BranchFeature>,
}

impl Branch {
    pub fn new(name: &str, length: f64, kind: BranchKind) -> Self {
        Self {
            name: name.to_string(),
            length,
            kind,
            cross_sections: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn channel(name: &str, length: f64) -> Self {
        Self::new(name, length, BranchKind::Channel)
    }

    pub fn with_cross_section(mut self, cross_section: BranchCrossSection) -> Self {
        self.cross_sections.push(cross_section);
        self
    }

    pub fn features(&self) -> &[BranchFeature] {
        &self.features
    }

    pub fn is_channel(&self) -> bool {
        matches!(self.kind, BranchKind::Channel)
    }

    pub fn is_internal_connection(&self) -> bool {
        matches!(self.kind, BranchKind::SewerConnection { internal: true })
    }

    /// Cross-section whose chainage is closest to `chainage`; the first one wins ties.
    pub fn nearest_cross_section(&self, chainage: f64) -> Option<&BranchCrossSection> {
        self.cross_sections.iter().reduce(|best, candidate| {
            if (candidate.chainage - chainage).abs() < (best.chainage - chainage).abs() {
                candidate
            } else {
                best
            }
        })
    }
}

/// Ordered group of structures sharing one chainage on one branch.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeStructure {
    pub name: String,
    pub long_name: String,
    pub branch: BranchId,
    pub chainage: f64,
    pub(crate) structures: Vec<StructureId>,
}

impl CompositeStructure {
    pub(crate) fn new(name: &str, long_name: &str, branch: BranchId, chainage: f64) -> Self {
        Self {
            name: name.to_string(),
            long_name: long_name.to_string(),
            branch,
            chainage,
            structures: Vec::new(),
        }
    }

    pub fn structures(&self) -> &[StructureId] {
        &self.structures
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}
