use crate::bundle::NetworkBundle;
use crate::cli::ImportArgs;
use crate::config::PartialImportConfig;
use crate::error::Result;
use hydrostruct::core::models::network::Network;
use hydrostruct::engine::config::ImportConfig;
use hydrostruct::engine::report::{ImportReporter, ImportSummary, MessageLog, Severity};
use hydrostruct::workflows::import::StructureImporter;
use std::fmt::Write;
use tracing::info;

pub fn run(args: ImportArgs) -> Result<()> {
    info!("Loading record bundle from {:?}", &args.input);
    let bundle = NetworkBundle::from_file(&args.input)?;
    let config = PartialImportConfig::load(args.config.as_deref())?.merge_with_cli(&args)?;

    let log = MessageLog::new();
    let reporter = log.reporter();

    println!(
        "Importing {} location(s) onto {} branch(es)...",
        bundle.records.locations.len(),
        bundle.branches.len()
    );
    let (network, summaries) = import_bundle(&bundle, &config, &reporter, args.repeat)?;

    for (pass, summary) in summaries.iter().enumerate() {
        println!("Pass {}: {}", pass + 1, summary);
    }
    print!("{}", render_network(&network));
    println!(
        "{} warning(s), {} error(s) reported.",
        log.count(Severity::Warning),
        log.count(Severity::Error)
    );
    Ok(())
}

/// Imports the bundle into a fresh network; with `repeat` a second pass runs against the first
/// pass's structures.
pub fn import_bundle(
    bundle: &NetworkBundle,
    config: &ImportConfig,
    reporter: &ImportReporter<'_>,
    repeat: bool,
) -> Result<(Network, Vec<ImportSummary>)> {
    let mut network = bundle.to_network();
    let importer = StructureImporter::new(&bundle.records, config, reporter);

    let mut summaries = vec![importer.run(&mut network, &[])?];
    if repeat {
        info!("Repeating the import against its own result.");
        summaries.push(importer.reimport(&mut network)?);
    }
    Ok((network, summaries))
}

/// One block per branch listing its composites and their structures.
pub fn render_network(network: &Network) -> String {
    let mut out = String::new();
    for (branch_id, branch) in network.branches_iter() {
        let composites = network.composites_on_branch(branch_id);
        let _ = writeln!(
            out,
            "Branch {} (length {}): {} composite(s)",
            branch.name,
            branch.length,
            composites.len()
        );
        for composite_id in composites {
            let Some(composite) = network.composite(composite_id) else {
                continue;
            };
            let _ = writeln!(
                out,
                "  {} at {:.2} \"{}\"",
                composite.name, composite.chainage, composite.long_name
            );
            for &structure_id in composite.structures() {
                if let Some(structure) = network.structure(structure_id) {
                    let _ = writeln!(
                        out,
                        "    - {} {} \"{}\"",
                        structure.family(),
                        structure.name(),
                        structure.long_name()
                    );
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::tests::SAMPLE;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn sample() -> NetworkBundle {
        toml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn import_places_structures_and_reports_skips() {
        let log = MessageLog::new();
        let reporter = log.reporter();

        let (network, summaries) =
            import_bundle(&sample(), &ImportConfig::default(), &reporter, false).unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].locations_processed, 2);
        assert_eq!(summaries[0].locations_skipped, 1);
        assert_eq!(network.structure_count(), 3);
        assert_eq!(log.matching(Severity::Error, "carrier id B7").len(), 1);
        assert_eq!(log.matching(Severity::Error, "from 140 to 100").len(), 1);
    }

    #[test]
    fn repeated_import_updates_instead_of_duplicating() {
        let reporter = ImportReporter::new();

        let (network, summaries) =
            import_bundle(&sample(), &ImportConfig::default(), &reporter, true).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].structures_inserted, 0);
        assert_eq!(summaries[1].structures_updated, 3);
        assert_eq!(network.structure_count(), 3);
        assert_eq!(network.composite_count(), 2);
    }

    #[test]
    fn rendering_lists_composites_per_branch() {
        let reporter = ImportReporter::new();
        let (network, _) =
            import_bundle(&sample(), &ImportConfig::default(), &reporter, false).unwrap();

        let text = render_network(&network);

        assert!(text.contains("Branch B1 (length 100): 2 composite(s)"));
        assert!(text.contains("  W1 [compound] at 40.00 \"Weir one\""));
        assert!(text.contains("    - weir W1 \"Weir one\""));
        assert!(text.contains("    - pump P12 \"Pump station\""));
        assert!(text.contains("Branch S1 (length 12): 0 composite(s)"));
    }

    #[test]
    fn run_reads_bundle_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let cli = Cli::try_parse_from([
            "hydrostruct",
            "import",
            "-i",
            path.to_str().unwrap(),
            "--repeat",
        ])
        .unwrap();

        let Commands::Import(args) = cli.command else {
            panic!("expected the import command");
        };
        assert!(run(args).is_ok());
    }
}
