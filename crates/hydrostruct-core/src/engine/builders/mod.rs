//! Construction of typed structures from legacy definitions.
//!
//! Each [`BuilderFamily`] accepts a fixed set of legacy type codes and turns one definition
//! into zero or more [`Structure`] values. Builders are stateless: every call returns fresh
//! instances, so the same definition referenced from two locations never shares a structure.
//! The [`BuilderRegistry`] owned by the importer runs a definition through every family.

pub mod bridge;
pub mod culvert;
pub mod pump;
pub mod weir;

use self::bridge::BridgeInitializers;
use super::config::ImportConfig;
use super::error::ImportError;
use super::report::ImportReporter;
use crate::core::hydraulics::cross_section::CrossSectionLookup;
use crate::core::hydraulics::flow_direction::FlowDirection;
use crate::core::models::records::{StructureDefinition, ValveTable};
use crate::core::models::structure::Structure;

/// Read-only data a builder may consult while constructing structures.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub cross_sections: &'a CrossSectionLookup,
    pub valve_tables: &'a [ValveTable],
    pub config: &'a ImportConfig,
    pub reporter: &'a ImportReporter<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderFamily {
    Weir,
    Pump,
    Bridge,
    Culvert,
}

impl BuilderFamily {
    pub const ALL: [BuilderFamily; 4] = [Self::Weir, Self::Pump, Self::Bridge, Self::Culvert];

    pub fn supports(self, type_code: i32) -> bool {
        match self {
            Self::Weir => weir::TYPE_CODES.contains(&type_code),
            Self::Pump => pump::TYPE_CODES.contains(&type_code),
            Self::Bridge => type_code == bridge::TYPE_CODE,
            Self::Culvert => type_code == culvert::TYPE_CODE,
        }
    }
}

/// The builder families an importer dispatches to, with the bridge initializers they use.
#[derive(Debug)]
pub struct BuilderRegistry {
    families: Vec<BuilderFamily>,
    bridge_initializers: BridgeInitializers,
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self {
            families: BuilderFamily::ALL.to_vec(),
            bridge_initializers: BridgeInitializers::default(),
        }
    }
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry restricted to the given families.
    pub fn with_families(families: &[BuilderFamily]) -> Self {
        Self {
            families: families.to_vec(),
            ..Self::default()
        }
    }

    pub fn families(&self) -> &[BuilderFamily] {
        &self.families
    }

    pub fn bridge_initializers(&self) -> &BridgeInitializers {
        &self.bridge_initializers
    }

    pub fn bridge_initializers_mut(&mut self) -> &mut BridgeInitializers {
        &mut self.bridge_initializers
    }

    /// Whether any registered family accepts the definition's type code.
    pub fn supports(&self, definition: &StructureDefinition) -> bool {
        let code = definition.kind.type_code();
        self.families.iter().any(|family| family.supports(code))
    }

    /// Runs a definition through every registered family and concatenates the results.
    ///
    /// A definition no family accepts yields an empty list.
    pub fn build(
        &self,
        definition: &StructureDefinition,
        ctx: &BuildContext<'_>,
    ) -> Result<Vec<Structure>, ImportError> {
        let code = definition.kind.type_code();
        let mut structures = Vec::new();
        for family in self.families.iter().filter(|f| f.supports(code)) {
            let built = match family {
                BuilderFamily::Weir => weir::build(definition, ctx)?,
                BuilderFamily::Pump => pump::build(definition, ctx)?,
                BuilderFamily::Bridge => bridge::build(definition, ctx, &self.bridge_initializers)?,
                BuilderFamily::Culvert => culvert::build(definition, ctx)?,
            };
            structures.extend(built);
        }
        Ok(structures)
    }
}

/// Converts a definition's directional code, attributing a failure to the definition.
pub(crate) fn flow_direction(
    definition: &StructureDefinition,
    code: i32,
) -> Result<FlowDirection, ImportError> {
    FlowDirection::from_code(code).map_err(|source| ImportError::InvalidFlowDirection {
        definition_id: definition.id.clone(),
        source,
    })
}

/// Display name of a definition in messages.
pub(crate) fn display_name(definition: &StructureDefinition) -> &str {
    if definition.name.trim().is_empty() {
        "<unnamed>"
    } else {
        &definition.name
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;
    use crate::core::models::records::{DefinitionKind, SimpleWeirData};
    use crate::engine::report::MessageLog;

    fn simple_weir() -> StructureDefinition {
        StructureDefinition::new(
            "D1",
            "weir",
            DefinitionKind::Weir(SimpleWeirData {
                crest_level: 1.0,
                crest_width: 2.0,
                discharge_coefficient: 1.0,
                lateral_contraction: 1.0,
                flow_direction: 0,
            }),
        )
    }

    #[test]
    fn families_accept_documented_type_codes() {
        for code in [0, 1, 2, 6, 7, 11] {
            assert!(BuilderFamily::Weir.supports(code), "weir code {code}");
        }
        assert!(BuilderFamily::Pump.supports(3));
        assert!(BuilderFamily::Pump.supports(9));
        assert!(BuilderFamily::Bridge.supports(12));
        assert!(BuilderFamily::Culvert.supports(10));
        assert!(!BuilderFamily::ALL.iter().any(|f| f.supports(4)));
    }

    #[test]
    fn registry_dispatches_to_accepting_family() {
        let fixture = Fixture::new();
        let reporter = ImportReporter::new();
        let registry = BuilderRegistry::new();

        let structures = registry.build(&simple_weir(), &fixture.context(&reporter)).unwrap();

        assert_eq!(structures.len(), 1);
        assert!(matches!(structures[0], Structure::Weir(_)));
    }

    #[test]
    fn registry_without_family_builds_nothing() {
        let fixture = Fixture::new();
        let reporter = ImportReporter::new();
        let registry = BuilderRegistry::with_families(&[BuilderFamily::Pump]);

        assert!(!registry.supports(&simple_weir()));
        assert!(registry
            .build(&simple_weir(), &fixture.context(&reporter))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unknown_type_code_builds_nothing() {
        let fixture = Fixture::new();
        let log = MessageLog::new();
        let reporter = log.reporter();
        let definition =
            StructureDefinition::new("D4", "db", DefinitionKind::DatabaseStructure);

        let structures = BuilderRegistry::new()
            .build(&definition, &fixture.context(&reporter))
            .unwrap();

        assert!(structures.is_empty());
    }

    #[test]
    fn invalid_flow_direction_is_fatal() {
        let fixture = Fixture::new();
        let reporter = ImportReporter::new();
        let mut definition = simple_weir();
        if let DefinitionKind::Weir(data) = &mut definition.kind {
            data.flow_direction = 7;
        }

        let err = BuilderRegistry::new()
            .build(&definition, &fixture.context(&reporter))
            .unwrap_err();

        assert!(matches!(
            err,
            ImportError::InvalidFlowDirection { ref definition_id, ref source }
                if definition_id == "D1" && source.code == 7
        ));
    }
}
