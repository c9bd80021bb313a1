use super::config::ImportConfig;
use super::report::ImportReporter;
use crate::core::models::branch::Branch;
use crate::core::models::formula::WeirFormula;
use crate::core::models::records::StructureLocation;
use crate::core::models::structure::Structure;

/// The chainage a location's composite is placed at on `branch`.
///
/// Internal sewer connections always use 0. Otherwise the requested chainage is clamped to
/// `[0, branch.length]`, and a correction is reported as an error.
pub fn clamp_chainage(
    branch: &Branch,
    location: &StructureLocation,
    reporter: &ImportReporter<'_>,
) -> f64 {
    if branch.is_internal_connection() {
        return 0.0;
    }
    let requested = location.chainage;
    let clamped = requested.min(branch.length).max(0.0);
    if clamped != requested {
        reporter.error(format!(
            "The chainage of structure '{} - {}' is out of the branch length. The chainage has been set from {} to {}.",
            location.id, location.name, requested, clamped
        ));
    }
    clamped
}

/// Lateral offset of a weir centred in the cross-section nearest to `chainage`.
///
/// Returns `None` for free-form weirs, whose profile already fixes their lateral position.
pub fn weir_offset_y(
    branch: &Branch,
    chainage: f64,
    crest_width: f64,
    formula: &WeirFormula,
    config: &ImportConfig,
) -> Option<f64> {
    if formula.is_free_form() {
        return None;
    }
    let (width, left_offset) = branch
        .nearest_cross_section(chainage)
        .map(|cs| (cs.width, cs.left_offset))
        .unwrap_or((
            config.fallback_cross_section_width,
            config.fallback_cross_section_offset,
        ));
    Some(left_offset + width / 2.0 - crest_width / 2.0)
}

/// Sets the lateral offset of a weir or orifice placed on `branch`; other structures are left alone.
pub fn apply_weir_offset(
    structure: &mut Structure,
    branch: &Branch,
    chainage: f64,
    config: &ImportConfig,
    reporter: &ImportReporter<'_>,
) {
    let (name, crest_width, formula, offset_y) = match structure {
        Structure::Weir(w) => (&w.name, w.crest_width, &w.formula, &mut w.offset_y),
        Structure::Orifice(o) => (&o.name, o.crest_width, &o.formula, &mut o.offset_y),
        _ => return,
    };

    if !branch.is_channel() {
        reporter.warn(format!(
            "Couldn't set the offset of weir {name} because it is not on a channel."
        ));
        return;
    }

    if let Some(offset) = weir_offset_y(branch, chainage, crest_width, formula, config) {
        *offset_y = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::branch::{BranchCrossSection, BranchKind};
    use crate::core::models::formula::FreeFormWeirFormula;
    use crate::core::models::structure::{Orifice, Pump, Weir};
    use crate::engine::report::{MessageLog, Severity};

    fn location(chainage: f64) -> StructureLocation {
        StructureLocation::new("S1", "B1", chainage, "structure one")
    }

    #[test]
    fn chainage_inside_branch_is_unchanged() {
        let log = MessageLog::new();
        let branch = Branch::channel("B1", 100.0);

        assert_eq!(clamp_chainage(&branch, &location(0.0), &log.reporter()), 0.0);
        assert_eq!(clamp_chainage(&branch, &location(42.5), &log.reporter()), 42.5);
        assert_eq!(clamp_chainage(&branch, &location(100.0), &log.reporter()), 100.0);
        assert!(log.messages().is_empty());
    }

    #[test]
    fn chainage_outside_branch_is_clamped_with_error() {
        let log = MessageLog::new();
        let branch = Branch::channel("B1", 100.0);

        assert_eq!(clamp_chainage(&branch, &location(150.0), &log.reporter()), 100.0);
        assert_eq!(clamp_chainage(&branch, &location(-3.0), &log.reporter()), 0.0);

        let errors = log.matching(Severity::Error, "S1 - structure one");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("from 150 to 100"));
        assert!(errors[1].contains("from -3 to 0"));
    }

    #[test]
    fn internal_connection_always_uses_zero() {
        let log = MessageLog::new();
        let branch = Branch::new("S", 10.0, BranchKind::SewerConnection { internal: true });

        assert_eq!(clamp_chainage(&branch, &location(7.0), &log.reporter()), 0.0);
        assert!(log.messages().is_empty());
    }

    #[test]
    fn offset_uses_nearest_cross_section() {
        let branch = Branch::channel("B1", 100.0)
            .with_cross_section(BranchCrossSection {
                chainage: 10.0,
                width: 20.0,
                left_offset: 5.0,
            })
            .with_cross_section(BranchCrossSection {
                chainage: 90.0,
                width: 40.0,
                left_offset: -10.0,
            });

        let offset = weir_offset_y(&branch, 80.0, 4.0, &WeirFormula::default(), &ImportConfig::default());

        assert_eq!(offset, Some(-10.0 + 20.0 - 2.0));
    }

    #[test]
    fn offset_falls_back_to_configured_cross_section() {
        let branch = Branch::channel("B1", 100.0);

        let offset = weir_offset_y(&branch, 50.0, 10.0, &WeirFormula::default(), &ImportConfig::default());

        assert_eq!(offset, Some(100.0 + 150.0 - 5.0));
    }

    #[test]
    fn free_form_weir_keeps_its_offset() {
        let log = MessageLog::new();
        let branch = Branch::channel("B1", 100.0);
        let mut structure = Structure::Weir(Weir {
            offset_y: 3.0,
            formula: WeirFormula::FreeForm(FreeFormWeirFormula {
                shape: None,
                discharge_coefficient: 1.0,
            }),
            ..Weir::default()
        });

        apply_weir_offset(&mut structure, &branch, 50.0, &ImportConfig::default(), &log.reporter());

        match structure {
            Structure::Weir(weir) => assert_eq!(weir.offset_y, 3.0),
            other => panic!("unexpected structure {other:?}"),
        }
    }

    #[test]
    fn orifice_offset_is_set_and_pump_is_ignored() {
        let log = MessageLog::new();
        let branch = Branch::channel("B1", 100.0);
        let mut orifice = Structure::Orifice(Orifice {
            crest_width: 2.0,
            ..Orifice::default()
        });
        let mut pump = Structure::Pump(Pump::default());
        let pump_before = pump.clone();

        apply_weir_offset(&mut orifice, &branch, 0.0, &ImportConfig::default(), &log.reporter());
        apply_weir_offset(&mut pump, &branch, 0.0, &ImportConfig::default(), &log.reporter());

        match orifice {
            Structure::Orifice(o) => assert_eq!(o.offset_y, 249.0),
            other => panic!("unexpected structure {other:?}"),
        }
        assert_eq!(pump, pump_before);
    }

    #[test]
    fn weir_on_sewer_connection_warns() {
        let log = MessageLog::new();
        let branch = Branch::new("S", 10.0, BranchKind::SewerConnection { internal: false });
        let mut structure = Structure::Weir(Weir {
            name: "W1".to_string(),
            offset_y: 1.0,
            ..Weir::default()
        });

        apply_weir_offset(&mut structure, &branch, 5.0, &ImportConfig::default(), &log.reporter());

        assert_eq!(log.matching(Severity::Warning, "W1").len(), 1);
        match structure {
            Structure::Weir(weir) => assert_eq!(weir.offset_y, 1.0),
            other => panic!("unexpected structure {other:?}"),
        }
    }
}
