use crate::core::hydraulics::cross_section::CrossSectionLookup;
use crate::core::models::ids::{BranchId, StructureId};
use crate::core::models::network::Network;
use crate::core::models::records::{ImportRecords, StructureLocation};
use crate::engine::builders::{BuildContext, BuilderRegistry};
use crate::engine::composer::{CompoundStructureComposer, Placement};
use crate::engine::config::ImportConfig;
use crate::engine::error::ImportError;
use crate::engine::geometry::clamp_chainage;
use crate::engine::report::{ImportReporter, ImportSummary};
use crate::engine::resolver::{LocationResolver, ResolvedLocation};
use std::fmt;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A mapping, compound group or definition could not be found.
    Unresolved,
    /// The location names a branch the network does not have.
    UnknownBranch(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => f.write_str("unresolved reference"),
            Self::UnknownBranch(branch) => write!(f, "unknown branch '{branch}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLocation {
    pub id: String,
    pub reason: SkipReason,
}

enum Triage<'r> {
    /// Reached through its compound, never placed on its own.
    CompoundMember,
    Skip(SkipReason),
    Place {
        resolved: ResolvedLocation<'r>,
        branch: BranchId,
    },
}

/// Imports one set of legacy records into a network.
///
/// The importer owns everything derived from the records (reference indexes, the cross-section
/// lookup and the builder registry), so it can be run repeatedly. Every run processes the
/// locations in input order; recoverable anomalies go to the reporter and never stop the pass.
#[derive(Debug)]
pub struct StructureImporter<'a> {
    records: &'a ImportRecords,
    config: &'a ImportConfig,
    reporter: &'a ImportReporter<'a>,
    resolver: LocationResolver<'a>,
    cross_sections: CrossSectionLookup,
    registry: BuilderRegistry,
}

impl<'a> StructureImporter<'a> {
    pub fn new(
        records: &'a ImportRecords,
        config: &'a ImportConfig,
        reporter: &'a ImportReporter<'a>,
    ) -> Self {
        Self::with_registry(records, config, reporter, BuilderRegistry::new())
    }

    pub fn with_registry(
        records: &'a ImportRecords,
        config: &'a ImportConfig,
        reporter: &'a ImportReporter<'a>,
        registry: BuilderRegistry,
    ) -> Self {
        Self {
            records,
            config,
            reporter,
            resolver: LocationResolver::new(records, reporter),
            cross_sections: records.cross_sections.iter().cloned().collect(),
            registry,
        }
    }

    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }

    /// Runs one import pass.
    ///
    /// Structures in `existing` are matched by family and name and updated in place instead of
    /// being duplicated. A fatal error stops the pass: locations handled before it stay imported
    /// and the failing location leaves the network untouched.
    #[instrument(skip_all, name = "structure_import")]
    pub fn run(
        &self,
        network: &mut Network,
        existing: &[StructureId],
    ) -> Result<ImportSummary, ImportError> {
        info!(
            locations = self.records.locations.len(),
            existing = existing.len(),
            "Starting structure import."
        );

        let ctx = BuildContext {
            cross_sections: &self.cross_sections,
            valve_tables: &self.records.valve_tables,
            config: self.config,
            reporter: self.reporter,
        };
        let composer = CompoundStructureComposer::new(&self.resolver, &self.registry, ctx, existing);
        let mut summary = ImportSummary::default();

        for location in &self.records.locations {
            let (resolved, branch_id) = match self.triage(network, location) {
                Triage::CompoundMember => continue,
                Triage::Skip(_) => {
                    summary.locations_skipped += 1;
                    continue;
                }
                Triage::Place { resolved, branch } => (resolved, branch),
            };

            let Some(branch) = network.branch(branch_id) else {
                return Err(ImportError::Internal(format!(
                    "branch '{}' disappeared after lookup",
                    location.branch_id
                )));
            };
            let placement = Placement {
                branch: branch_id,
                chainage: clamp_chainage(branch, location, self.reporter),
            };

            summary.locations_processed += 1;
            composer.compose(network, placement, location, &resolved, &mut summary)?;
        }

        info!("Structure import complete: {}.", summary);
        Ok(summary)
    }

    /// Runs a pass against every structure currently in the network.
    pub fn reimport(&self, network: &mut Network) -> Result<ImportSummary, ImportError> {
        let existing = network.structure_ids();
        self.run(network, &existing)
    }

    /// Lists the locations a pass would skip, without touching the network.
    ///
    /// The same messages a pass reports for these locations are reported here.
    pub fn check(&self, network: &Network) -> Vec<SkippedLocation> {
        self.records
            .locations
            .iter()
            .filter_map(|location| match self.triage(network, location) {
                Triage::Skip(reason) => Some(SkippedLocation {
                    id: location.id.clone(),
                    reason,
                }),
                Triage::CompoundMember | Triage::Place { .. } => None,
            })
            .collect()
    }

    fn triage(&self, network: &Network, location: &StructureLocation) -> Triage<'a> {
        let Some(resolved) = self.resolver.resolve(location, self.reporter) else {
            return Triage::Skip(SkipReason::Unresolved);
        };

        if location.is_compound_member() {
            debug!(location = %location.id, "Skipping compound member location.");
            return Triage::CompoundMember;
        }

        match network.find_branch(&location.branch_id) {
            Some(branch) => Triage::Place { resolved, branch },
            None => {
                self.reporter.error(format!(
                    "Can not add structure {} to branch; carrier id {} not found.",
                    location.id, location.branch_id
                ));
                Triage::Skip(SkipReason::UnknownBranch(location.branch_id.clone()))
            }
        }
    }
}
