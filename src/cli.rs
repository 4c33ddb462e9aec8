//! Command line interface.

use crate::error::Struct2SeqError;
use crate::peptides::PeptideBuilder;
use crate::process_file;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, trace};

const LONG_ABOUT: &str = "\
Extract chains' and polypeptides' sequences from PDB or mmCIF files.

Only residues with structural information are saved. Residues missing from the \
structure split a chain into more than one polypeptide.

Two files are generated per input structure: <input>_peptides.fasta with each \
individual polypeptide sequence, and <input>_chains.fasta with whole chain \
sequences, where the polypeptides of a chain are concatenated.

FASTA IDs are <base_input_filename>.<model_id>_<chain_id> for chains and \
<base_input_filename>.<model_id>_<chain_id>.<peptide_id> for polypeptides. The \
chain sequence files are handy when aligning target sequences against structural \
templates for homology modelling.";

/// Command line arguments of `struct2seq`.
#[derive(Parser, Debug, Clone)]
#[command(about, long_about = LONG_ABOUT, disable_version_flag = true)]
pub struct Args {
    /// Structure file (PDB or mmCIF)
    #[arg(value_name = "STRUCTFILE", required_unless_present = "version")]
    pub structfile: Vec<PathBuf>,

    /// Show program's version number and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}

/// What a batch run amounted to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Inputs whose FASTA files were written
    pub written: Vec<PathBuf>,
    /// Inputs skipped because no reader accepted them
    pub skipped: Vec<PathBuf>,
}

/// Process every input in order.
///
/// Unreadable inputs are reported and skipped; a write failure stops the batch
/// and is returned.
pub fn run(args: &Args) -> Result<BatchSummary, Struct2SeqError> {
    trace!("{args:?}");
    let builder = PeptideBuilder::default();
    let mut summary = BatchSummary::default();

    for input_file in &args.structfile {
        match process_file(input_file, &builder) {
            Ok(paths) => {
                debug!("Finished {}: {paths:?}", input_file.display());
                summary.written.push(input_file.clone());
            }
            Err(e) if e.is_recoverable() => {
                eprintln!("ERROR: {e}");
                summary.skipped.push(input_file.clone());
            }
            Err(e) => {
                error!("Aborting after {}", input_file.display());
                return Err(e);
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data;

    #[test]
    fn parses_several_files() {
        let args = Args::try_parse_from(["struct2seq", "a.pdb", "b.cif"]).unwrap();
        assert_eq!(
            args.structfile,
            vec![PathBuf::from("a.pdb"), PathBuf::from("b.cif")]
        );
        assert!(!args.version);
    }

    #[test]
    fn requires_a_file() {
        assert!(Args::try_parse_from(["struct2seq"]).is_err());
    }

    #[test]
    fn version_needs_no_file() {
        let args = Args::try_parse_from(["struct2seq", "-v"]).unwrap();
        assert!(args.version);
        let args = Args::try_parse_from(["struct2seq", "--version"]).unwrap();
        assert!(args.version);
    }

    #[test]
    fn batch_continues_past_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let inputs: Vec<PathBuf> = ["not_a_structure.txt", "test.pdb"]
            .iter()
            .map(|f| {
                let path = dir.path().join(f);
                std::fs::copy(test_data(f), &path).unwrap();
                path
            })
            .collect();

        let args = Args {
            structfile: inputs.clone(),
            version: false,
        };
        let summary = run(&args).unwrap();
        assert_eq!(summary.skipped, vec![inputs[0].clone()]);
        assert_eq!(summary.written, vec![inputs[1].clone()]);
        assert!(dir.path().join("test_chains.fasta").exists());
    }

    #[test]
    fn write_failure_stops_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let inputs: Vec<PathBuf> = ["test.pdb", "broken.pdb"]
            .iter()
            .map(|f| {
                let path = dir.path().join(f);
                std::fs::copy(test_data(f), &path).unwrap();
                path
            })
            .collect();
        let blocked = dir.path().join("test_chains.fasta");
        std::fs::create_dir(&blocked).unwrap();

        let args = Args {
            structfile: inputs,
            version: false,
        };
        match run(&args) {
            Err(Struct2SeqError::Write { path, .. }) => assert_eq!(path, blocked),
            other => panic!("Expected a write error, got {other:?}"),
        }
        assert!(!dir.path().join("broken_chains.fasta").exists());
        assert!(!dir.path().join("broken_peptides.fasta").exists());
    }
}
