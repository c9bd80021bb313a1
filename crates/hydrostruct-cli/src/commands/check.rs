use crate::bundle::NetworkBundle;
use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use hydrostruct::engine::config::ImportConfig;
use hydrostruct::engine::report::ImportReporter;
use hydrostruct::workflows::import::{SkippedLocation, StructureImporter};
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    info!("Checking record bundle {:?}", &args.input);
    let bundle = NetworkBundle::from_file(&args.input)?;

    let skipped = check_bundle(&bundle);
    if skipped.is_empty() {
        println!(
            "All {} location(s) resolve.",
            bundle.records.locations.len()
        );
        return Ok(());
    }

    for location in &skipped {
        println!("  {}: {}", location.id, location.reason);
    }
    Err(CliError::Check {
        skipped: skipped.len(),
    })
}

/// Locations an import of the bundle would skip. The network is built but never mutated.
pub fn check_bundle(bundle: &NetworkBundle) -> Vec<SkippedLocation> {
    let network = bundle.to_network();
    let config = ImportConfig::default();
    let reporter = ImportReporter::new();
    StructureImporter::new(&bundle.records, &config, &reporter).check(&network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::tests::SAMPLE;
    use hydrostruct::workflows::import::SkipReason;
    use std::path::PathBuf;

    #[test]
    fn unknown_branch_is_listed() {
        let bundle: NetworkBundle = toml::from_str(SAMPLE).unwrap();

        let skipped = check_bundle(&bundle);

        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].id, "X1");
        assert_eq!(skipped[0].reason, SkipReason::UnknownBranch("B7".to_string()));
    }

    #[test]
    fn run_fails_with_the_number_of_skipped_locations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let result = run(CheckArgs { input: path });

        assert!(matches!(result, Err(CliError::Check { skipped: 1 })));
    }

    #[test]
    fn missing_bundle_is_an_io_error() {
        let result = run(CheckArgs {
            input: PathBuf::from("/nonexistent/bundle.toml"),
        });
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
