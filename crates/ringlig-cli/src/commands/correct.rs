use crate::cli::Cli;
use crate::config;
use crate::error::Result;
use ringlig::core::features::rules::RuleBasedClassifier;
use ringlig::workflows;
use tracing::info;

pub fn run(cli: &Cli) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let final_config = config::resolve(cli)?;

    info!(
        "Correcting residue {} in {:?}",
        final_config.rename.residue_name(),
        &final_config.input_path
    );
    let classifier = RuleBasedClassifier::new();
    let report = workflows::correct::run(&final_config, &classifier)?;

    println!(
        "✓ Corrected structure ({} atoms, {} renamed) written to: {}",
        report.atoms_written,
        report.atoms_renamed,
        report.corrected_pdb.display()
    );
    if let Some(path) = &report.connections {
        println!(
            "  Reduced connectivity ({} records) written to: {}",
            report.bond_records,
            path.display()
        );
    }
    if let Some(path) = &report.acc_dons {
        if let Some(features) = &report.features {
            println!(
                "  {} acceptor(s) and {} donor(s) written to: {}",
                features.acceptors.len(),
                features.donors.len(),
                path.display()
            );
        }
    }

    Ok(())
}
