use super::{BuildContext, display_name};
use crate::core::models::records::{DefinitionKind, PumpData, StructureDefinition};
use crate::core::models::structure::{Pump, PumpControlDirection, Structure};
use crate::engine::error::ImportError;

/// River pump and pump.
pub const TYPE_CODES: [i32; 2] = [3, 9];

/// Builds one pump per capacity row.
///
/// The legacy table is cumulative: each row holds the total capacity with that many pumps
/// running, so a pump's own capacity is the increment over the previous row. The first pump
/// gets an empty name suffix, later ones their 1-based position.
pub fn build(
    definition: &StructureDefinition,
    ctx: &BuildContext<'_>,
) -> Result<Vec<Structure>, ImportError> {
    let data = match &definition.kind {
        DefinitionKind::RiverPump(data) | DefinitionKind::Pump(data) => data,
        other => {
            return Err(ImportError::Internal(format!(
                "pump builder called for definition '{}' of type {}",
                definition.id,
                other.type_code()
            )));
        }
    };

    if data.capacity_table.is_empty() {
        ctx.reporter.warn(format!(
            "Pump '{}' (id = {}) has an empty capacity table; no pump is imported.",
            display_name(definition),
            definition.id
        ));
        return Ok(Vec::new());
    }

    let control_direction = control_direction(data);
    let direction_is_positive = data.control_direction >= 0;

    let mut previous_capacity = 0.0;
    let pumps = data
        .capacity_table
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let capacity = row.capacity - previous_capacity;
            previous_capacity = row.capacity;
            Structure::Pump(Pump {
                name: suffix(index),
                capacity,
                suction_start: row.suction_start,
                suction_stop: row.suction_stop,
                delivery_start: row.delivery_start,
                delivery_stop: row.delivery_stop,
                control_direction,
                direction_is_positive,
                ..Pump::default()
            })
        })
        .collect();
    Ok(pumps)
}

fn control_direction(data: &PumpData) -> PumpControlDirection {
    match data.control_direction.abs() {
        1 => PumpControlDirection::SuctionSide,
        2 => PumpControlDirection::DeliverySide,
        _ => PumpControlDirection::SuctionAndDeliverySide,
    }
}

fn suffix(index: usize) -> String {
    if index == 0 {
        String::new()
    } else {
        (index + 1).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::core::models::records::PumpCapacityRow;
    use crate::engine::report::{ImportReporter, MessageLog, Severity};

    fn row(capacity: f64) -> PumpCapacityRow {
        PumpCapacityRow {
            capacity,
            suction_start: 1.0,
            suction_stop: 0.5,
            delivery_start: 2.0,
            delivery_stop: 2.5,
        }
    }

    fn pump_definition(control_direction: i32, capacities: &[f64]) -> StructureDefinition {
        StructureDefinition::new(
            "P1",
            "pump station",
            DefinitionKind::Pump(PumpData {
                control_direction,
                capacity_table: capacities.iter().map(|&c| row(c)).collect(),
            }),
        )
    }

    fn pumps(structures: Vec<Structure>) -> Vec<Pump> {
        structures
            .into_iter()
            .map(|s| match s {
                Structure::Pump(p) => p,
                other => panic!("expected pump, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn cumulative_table_fans_out_into_incremental_pumps() {
        let fixture = Fixture::new();
        let reporter = ImportReporter::new();

        let pumps = pumps(
            build(&pump_definition(1, &[5.0, 12.0, 20.0]), &fixture.context(&reporter)).unwrap(),
        );

        let capacities: Vec<f64> = pumps.iter().map(|p| p.capacity).collect();
        let names: Vec<&str> = pumps.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(capacities, vec![5.0, 7.0, 8.0]);
        assert_eq!(names, vec!["", "2", "3"]);
        assert!(pumps.iter().all(|p| p.suction_start == 1.0 && p.delivery_stop == 2.5));
    }

    #[test]
    fn control_code_sets_side_and_direction() {
        let fixture = Fixture::new();
        let reporter = ImportReporter::new();
        let ctx = fixture.context(&reporter);

        let suction = pumps(build(&pump_definition(1, &[1.0]), &ctx).unwrap());
        assert_eq!(suction[0].control_direction, PumpControlDirection::SuctionSide);
        assert!(suction[0].direction_is_positive);

        let delivery = pumps(build(&pump_definition(-2, &[1.0]), &ctx).unwrap());
        assert_eq!(delivery[0].control_direction, PumpControlDirection::DeliverySide);
        assert!(!delivery[0].direction_is_positive);

        let both = pumps(build(&pump_definition(3, &[1.0]), &ctx).unwrap());
        assert_eq!(both[0].control_direction, PumpControlDirection::SuctionAndDeliverySide);

        let other = pumps(build(&pump_definition(7, &[1.0]), &ctx).unwrap());
        assert_eq!(other[0].control_direction, PumpControlDirection::SuctionAndDeliverySide);
    }

    #[test]
    fn empty_capacity_table_warns_and_builds_nothing() {
        let fixture = Fixture::new();
        let log = MessageLog::new();
        let reporter = log.reporter();

        let structures = build(&pump_definition(1, &[]), &fixture.context(&reporter)).unwrap();

        assert!(structures.is_empty());
        assert_eq!(log.matching(Severity::Warning, "P1").len(), 1);
    }
}
