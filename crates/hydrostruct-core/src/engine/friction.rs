use super::config::ImportConfig;
use super::report::ImportReporter;
use crate::core::hydraulics::friction::{FrictionFunction, FrictionType};
use crate::core::models::records::FrictionRecord;
use crate::core::models::structure::{StructureFamily, StructureFriction};

/// Applies a legacy friction record to the friction of a bridge or culvert.
///
/// Without a record, or with a record whose friction is not constant, the configured default
/// is applied. A record with an unknown friction type leaves `friction` untouched.
pub fn resolve_friction(
    friction: &mut StructureFriction,
    structure_name: &str,
    family: StructureFamily,
    record: Option<&FrictionRecord>,
    config: &ImportConfig,
    reporter: &ImportReporter<'_>,
) {
    let Some(record) = record else {
        apply_default(friction, config);
        reporter.debug(format!(
            "Friction of {family} {structure_name} not found in import file; set default type {} and value {}.",
            config.default_friction_type, config.default_friction_value
        ));
        return;
    };

    if record.main_function != FrictionFunction::Constant {
        apply_default(friction, config);
        reporter.debug(format!(
            "Only constant friction for structures supported. {} friction of {family} {structure_name} set to default type {} and value {}.",
            record.main_function, config.default_friction_type, config.default_friction_value
        ));
        return;
    }

    let main_type = match FrictionType::try_from(record.main_type) {
        Ok(main_type) => main_type,
        Err(e) => {
            reporter.warn(format!(
                "{family} '{structure_name}': bed friction type (={}) does not exist for {family}s: {e}.",
                record.main_type
            ));
            return;
        }
    };

    friction.friction_type = main_type;
    friction.value = record.main_value;

    if record.ground_layer_type != record.main_type && friction.ground_layer.enabled {
        reporter.warn(format!(
            "{family} '{structure_name}': bed friction type (={main_type}) and ground layer friction type (={}) should be the same. Ground layer roughness was set to 0.",
            record.ground_layer_type
        ));
        friction.ground_layer.roughness = 0.0;
    } else {
        friction.ground_layer.roughness = record.ground_layer_value;
    }
}

fn apply_default(friction: &mut StructureFriction, config: &ImportConfig) {
    friction.friction_type = config.default_friction_type;
    friction.value = config.default_friction_value;
}
