//! Sequence extraction from protein structures.
//!
//! This module turns the chains of a structure into FASTA records, one per
//! polypeptide and one per chain, and writes them to disk.

use crate::chains::ChainExt;
use crate::error::{Result, Struct2SeqError};
use crate::peptides::PeptideBuilder;
use noodles_fasta::{
    self as fasta,
    record::{Definition, Sequence},
};
use pdbtbx::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Residues per sequence line in written FASTA files.
pub const LINE_WIDTH: usize = 60;

/// A single FASTA entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Identifier, written right after `>`
    pub id: String,
    /// Free text following the identifier
    pub description: String,
    /// One-letter residue codes
    pub sequence: String,
}

impl FastaRecord {
    /// The record as a [`noodles_fasta::Record`] with `id` as name.
    pub fn to_fasta(&self) -> fasta::Record {
        let definition = Definition::new(self.id.as_str(), Some(self.description.as_str().into()));
        fasta::Record::new(definition, Sequence::from(self.sequence.as_bytes().to_vec()))
    }
}

/// Chain and peptide records of one structure.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SequenceRecords {
    /// One record per chain
    pub chains: Vec<FastaRecord>,
    /// One record per polypeptide
    pub peptides: Vec<FastaRecord>,
}

/// Paths of the two FASTA files written for one structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaPaths {
    /// Chain sequences
    pub chains: PathBuf,
    /// Polypeptide sequences
    pub peptides: PathBuf,
}

impl FastaPaths {
    /// `<base>_chains.fasta` and `<base>_peptides.fasta`.
    pub fn from_base(base: &Path) -> Self {
        let with_suffix = |suffix: &str| {
            let mut name = base.as_os_str().to_owned();
            name.push(suffix);
            PathBuf::from(name)
        };
        Self {
            chains: with_suffix("_chains.fasta"),
            peptides: with_suffix("_peptides.fasta"),
        }
    }
}

/// Build the FASTA records of every chain in every model.
///
/// Models are numbered by position starting at 0. Chain IDs are
/// `<name>.<model>_<chain>` and peptide IDs append `.<peptide>`. A chain's
/// sequence is the concatenation of its peptides, so residues outside any
/// peptide are left out of both.
///
/// # Arguments
///
/// * `pdb` - Reference to a PDB structure
/// * `name` - Prefix of every record ID, usually the input's base name
/// * `description` - Text written after the ID of every record
/// * `builder` - Peptide builder deciding where chains are split
///
/// # Returns
///
/// A [`SequenceRecords`] with one record per chain and one per peptide.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use struct2seq::{collect_records, load_structure, Metadata, PeptideBuilder};
///
/// let path = Path::new("path/to/1abc.pdb");
/// let loaded = load_structure(path).unwrap();
/// let description = Metadata::extract(loaded.format, path).description();
/// let records = collect_records(&loaded.pdb, &loaded.name, &description, &PeptideBuilder::default());
/// for record in &records.peptides {
///     println!("{} {}", record.id, record.sequence);
/// }
/// ```
pub fn collect_records(
    pdb: &PDB,
    name: &str,
    description: &str,
    builder: &PeptideBuilder,
) -> SequenceRecords {
    let mut records = SequenceRecords::default();

    for (model_id, model) in pdb.models().enumerate() {
        for chain in model.chains() {
            let base_id = format!("{name}.{model_id}_{}", chain.id());
            let mut chain_seq = String::new();

            for peptide in chain.peptides(builder) {
                chain_seq.push_str(&peptide.sequence);
                records.peptides.push(FastaRecord {
                    id: format!("{base_id}.{}", peptide.index),
                    description: description.to_string(),
                    sequence: peptide.sequence,
                });
            }

            records.chains.push(FastaRecord {
                id: base_id,
                description: description.to_string(),
                sequence: chain_seq,
            });
        }
    }

    records
}

/// Write records to any writer in FASTA format, wrapping sequences at
/// [`LINE_WIDTH`] residues. An empty sequence leaves only the header line.
pub fn write_fasta<W: Write>(records: &[FastaRecord], writer: W) -> std::io::Result<()> {
    let mut writer = fasta::io::writer::Builder::default()
        .set_line_base_count(LINE_WIDTH)
        .build_from_writer(writer);
    for record in records {
        writer.write_record(&record.to_fasta())?;
    }
    writer.get_mut().flush()
}

/// Create (or truncate) a FASTA file and write the records into it.
pub fn write_fasta_file(records: &[FastaRecord], path: &Path) -> Result<()> {
    let to_error = |source| Struct2SeqError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    write_fasta(records, BufWriter::new(file)).map_err(to_error)
}

/// Write the chain and peptide FASTA files next to `base`.
pub fn write_records(records: &SequenceRecords, base: &Path) -> Result<FastaPaths> {
    let paths = FastaPaths::from_base(base);
    write_fasta_file(&records.chains, &paths.chains)?;
    write_fasta_file(&records.peptides, &paths.peptides)?;
    Ok(paths)
}
