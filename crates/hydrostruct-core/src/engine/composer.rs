use super::builders::{BuildContext, BuilderRegistry};
use super::error::ImportError;
use super::friction::resolve_friction;
use super::geometry::apply_weir_offset;
use super::merger::{MergeOutcome, merge_structure};
use super::report::ImportSummary;
use super::resolver::{LocationResolver, ResolvedLocation, ResolvedMember};
use crate::core::models::ids::{BranchId, CompositeId, StructureId};
use crate::core::models::network::Network;
use crate::core::models::records::StructureLocation;
use crate::core::models::structure::Structure;
use tracing::debug;

/// Where a location's composite goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub branch: BranchId,
    /// Already clamped to the branch.
    pub chainage: f64,
}

/// Places the structures of one resolved location on a branch.
#[derive(Debug)]
pub struct CompoundStructureComposer<'a> {
    resolver: &'a LocationResolver<'a>,
    registry: &'a BuilderRegistry,
    ctx: BuildContext<'a>,
    existing: &'a [StructureId],
}

impl<'a> CompoundStructureComposer<'a> {
    /// `existing` lists the structures that may be updated instead of duplicated.
    pub fn new(
        resolver: &'a LocationResolver<'a>,
        registry: &'a BuilderRegistry,
        ctx: BuildContext<'a>,
        existing: &'a [StructureId],
    ) -> Self {
        Self {
            resolver,
            registry,
            ctx,
            existing,
        }
    }

    /// Builds the structures of `location`, then creates its composite and merges them in.
    ///
    /// Returns the composite, or `None` when nothing could be built. Every member is built
    /// before the network is touched, so a build error leaves the network as it was.
    pub fn compose(
        &self,
        network: &mut Network,
        placement: Placement,
        location: &StructureLocation,
        resolved: &ResolvedLocation<'_>,
        summary: &mut ImportSummary,
    ) -> Result<Option<CompositeId>, ImportError> {
        let structures = self.build_members(network, placement, location, resolved)?;
        if structures.is_empty() {
            debug!(location = %location.id, "No structures built; skipping composite.");
            return Ok(None);
        }

        let name = format!("{}{}", location.id, self.ctx.config.composite_name_suffix);
        let composite = network
            .add_composite(placement.branch, placement.chainage, &name, &location.name)
            .ok_or_else(|| {
                ImportError::Internal(format!(
                    "branch {:?} of location '{}' vanished during import",
                    placement.branch, location.id
                ))
            })?;
        summary.composites_created += 1;

        for structure in structures {
            let outcome = match merge_structure(network, structure, composite, self.existing) {
                Ok(outcome) => outcome,
                Err(e) => {
                    // Structures already merged may have been moved in; only an empty composite goes.
                    if network.composite(composite).is_some_and(|c| c.is_empty()) {
                        network.remove_composite(composite);
                        summary.composites_removed += 1;
                    }
                    return Err(e);
                }
            };
            match outcome {
                MergeOutcome::Inserted(_) => summary.structures_inserted += 1,
                MergeOutcome::Updated {
                    moved,
                    removed_composite,
                    ..
                } => {
                    summary.structures_updated += 1;
                    if moved {
                        summary.structures_moved += 1;
                    }
                    if removed_composite.is_some() {
                        summary.composites_removed += 1;
                    }
                }
            }
        }
        Ok(Some(composite))
    }

    fn build_members(
        &self,
        network: &Network,
        placement: Placement,
        location: &StructureLocation,
        resolved: &ResolvedLocation<'_>,
    ) -> Result<Vec<Structure>, ImportError> {
        let mut structures = Vec::new();
        for member in resolved.members() {
            let display_name = match resolved {
                ResolvedLocation::Single(_) => location.name.clone(),
                ResolvedLocation::Compound { .. } => self.member_display_name(member),
            };

            for mut structure in self.registry.build(member.definition, &self.ctx)? {
                self.finish(&mut structure, member, &display_name, network, placement);
                structures.push(structure);
            }
        }
        Ok(structures)
    }

    /// Names the structure and applies the placement and friction policies.
    fn finish(
        &self,
        structure: &mut Structure,
        member: &ResolvedMember<'_>,
        display_name: &str,
        network: &Network,
        placement: Placement,
    ) {
        let structure_id = &member.mapping.structure_id;
        let name = match structure {
            // Pump builders fan out into several pumps distinguished by their name suffix.
            Structure::Pump(pump) => format!("{structure_id}{}", pump.name),
            _ => structure_id.clone(),
        };
        structure.set_name(name);
        structure.set_long_name(display_name);

        if let Some(branch) = network.branch(placement.branch) {
            apply_weir_offset(
                structure,
                branch,
                placement.chainage,
                self.ctx.config,
                self.ctx.reporter,
            );
        }

        let family = structure.family();
        let record = self.resolver.friction_for(&member.definition.id);
        let (friction, name) = match structure {
            Structure::Bridge(bridge) => (&mut bridge.friction, &bridge.name),
            Structure::Culvert(culvert) => (&mut culvert.friction, &culvert.name),
            _ => return,
        };
        resolve_friction(
            friction,
            name,
            family,
            record,
            self.ctx.config,
            self.ctx.reporter,
        );
    }

    fn member_display_name(&self, member: &ResolvedMember<'_>) -> String {
        if !member.mapping.name.is_empty() {
            return member.mapping.name.clone();
        }
        self.resolver
            .sibling_name(&member.mapping.structure_id)
            .unwrap_or_default()
            .to_string()
    }
}
