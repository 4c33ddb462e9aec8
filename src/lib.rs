#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # struct2seq Library
//!
//! Reads PDB or mmCIF structure files with [`pdbtbx`] and writes the amino
//! acid sequences they contain as FASTA, once per polypeptide and once per
//! chain. The command line tool is a thin loop over [`process_file`].

mod chains;
pub mod cif;
pub mod cli;
mod error;
pub mod header;
pub mod logging;
pub mod metadata;
pub mod peptides;
mod pipeline;
mod residues;
pub mod sequences;
mod utils;

// Re-export key public types
pub use chains::ChainExt;
pub use error::{LoadError, Result, Struct2SeqError};
pub use metadata::{Metadata, UNKNOWN_RESOLUTION};
pub use peptides::{Peptide, PeptideBuilder};
pub use pipeline::process_file;
pub use residues::ResidueExt;
pub use sequences::{collect_records, write_records, FastaPaths, FastaRecord, SequenceRecords};
pub use utils::{base_name, load_structure, output_base, LoadedStructure, StructureFormat};

#[cfg(test)]
pub(crate) fn test_data(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}
