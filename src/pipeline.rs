use crate::chains::ChainExt;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::peptides::PeptideBuilder;
use crate::sequences::{collect_records, write_records, FastaPaths};
use crate::utils::{load_structure, output_base};

use pdbtbx::ErrorLevel;
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Core function of the library: load one structure file and write its chain
/// and peptide FASTA files next to it.
///
/// # Arguments
///
/// * `input_file` - Path to a PDB or mmCIF file
/// * `builder` - Peptide builder deciding where chains are split
///
/// # Returns
///
/// The paths of the `<input>_chains.fasta` and `<input>_peptides.fasta` files.
/// Fails with [`crate::LoadError::UnsupportedFormat`] when the file is neither
/// PDB nor mmCIF, and with a write error when an output file cannot be written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use struct2seq::{process_file, PeptideBuilder};
///
/// let paths = process_file(Path::new("path/to/1abc.pdb"), &PeptideBuilder::default()).unwrap();
/// println!("Chains written to {}", paths.chains.display());
/// ```
pub fn process_file(input_file: &Path, builder: &PeptideBuilder) -> Result<FastaPaths> {
    let loaded = load_structure(input_file)?;
    loaded.warnings.iter().for_each(|e| match e.level() {
        ErrorLevel::BreakingError | ErrorLevel::InvalidatingError => warn!("{e}"),
        _ => debug!("{e}"),
    });

    // Information on the sequence of the chains in the model
    debug!(
        "Loaded {} model(s) with {} chain(s) from {} as {}",
        loaded.pdb.model_count(),
        loaded.pdb.chain_count(),
        input_file.display(),
        loaded.format
    );
    for chain in loaded.pdb.chains() {
        trace!(">{}\n{}", chain.id(), chain.pdb_seq().join(""));
    }

    let metadata = Metadata::extract(loaded.format, input_file);
    let records = collect_records(&loaded.pdb, &loaded.name, &metadata.description(), builder);
    let paths = write_records(&records, &output_base(input_file))?;

    info!(
        "Wrote {} chain(s) to {} and {} peptide(s) to {}",
        records.chains.len(),
        paths.chains.display(),
        records.peptides.len(),
        paths.peptides.display()
    );
    Ok(paths)
}
