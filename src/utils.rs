use crate::error::LoadError;
use pdbtbx::*;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Width of a complete PDB record.
const PDB_LINE_WIDTH: usize = 80;

type ReadOutcome = std::result::Result<(PDB, Vec<PDBError>), Vec<PDBError>>;

/// Structure file formats understood by the loader, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructureFormat {
    /// Protein Data Bank fixed-column text
    Pdb,
    /// PDBx/mmCIF
    Mmcif,
}

impl StructureFormat {
    const TRIAL_ORDER: [StructureFormat; 2] = [StructureFormat::Pdb, StructureFormat::Mmcif];

    fn as_pdbtbx(self) -> Format {
        match self {
            StructureFormat::Pdb => Format::Pdb,
            StructureFormat::Mmcif => Format::Mmcif,
        }
    }
}

impl std::fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StructureFormat::Pdb => write!(f, "PDB"),
            StructureFormat::Mmcif => write!(f, "mmCIF"),
        }
    }
}

/// A parsed structure together with where it came from.
#[derive(Debug)]
pub struct LoadedStructure {
    /// Base name of the input file, used as the prefix of every record ID
    pub name: String,
    /// The reader that accepted the file
    pub format: StructureFormat,
    /// The parsed hierarchy
    pub pdb: PDB,
    /// Non-fatal diagnostics reported by the accepted reader
    pub warnings: Vec<PDBError>,
}

/// File name without directory and without its last extension.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Path of the input with its last extension removed; output files are named after it.
pub fn output_base(path: &Path) -> PathBuf {
    path.with_extension("")
}

/// Open an atomic data file with [`pdbtbx::ReadOptions`] for one specific format.
///
/// PDB files whose coordinate records stop before the element columns are read
/// again with every line padded to the full record width. A read that succeeds
/// without producing a single atom is rejected, since the lenient PDB reader
/// accepts arbitrary text as an empty structure. The diagnostics of a rejected
/// read are returned as the error.
pub fn read_structure(path: &Path, format: StructureFormat) -> ReadOutcome {
    let read = ReadOptions::default()
        .set_format(format.as_pdbtbx())
        .set_level(StrictnessLevel::Loose)
        .set_only_atomic_coords(true)
        .read(path.to_string_lossy());

    let (pdb, errors) = match (format, read) {
        (StructureFormat::Pdb, Err(errors)) => match read_padded_pdb(path) {
            Some(padded) => padded?,
            None => return Err(errors),
        },
        (_, read) => read?,
    };

    if pdb.atom_count() == 0 {
        debug!("{} holds no atoms when read as {format}", path.display());
        return Err(errors);
    }

    Ok((pdb, errors))
}

/// Re-read a PDB file with short coordinate records padded with blanks.
///
/// `None` when the file can't be read as text or has no short records.
fn read_padded_pdb(path: &Path) -> Option<ReadOutcome> {
    let text = std::fs::read_to_string(path).ok()?;
    let padded = pad_short_records(&text)?;
    debug!(
        "Reading {} again with lines padded to {PDB_LINE_WIDTH} columns",
        path.display()
    );
    Some(open_pdb_raw(
        BufReader::new(Cursor::new(padded.into_bytes())),
        Context::show(path.display().to_string()),
        StrictnessLevel::Loose,
    ))
}

/// Pad every line to [`PDB_LINE_WIDTH`] if some coordinate record is shorter.
fn pad_short_records(text: &str) -> Option<String> {
    if !text.lines().any(is_short_coordinate_record) {
        return None;
    }

    let mut padded = String::with_capacity(text.len() + PDB_LINE_WIDTH);
    for line in text.lines() {
        padded.push_str(&format!("{line:<width$}\n", width = PDB_LINE_WIDTH));
    }
    Some(padded)
}

/// An `ATOM`/`HETATM` record with x, y and z in columns 31-54 that ends before
/// the element columns. mmCIF `atom_site` rows never match.
fn is_short_coordinate_record(line: &str) -> bool {
    (line.starts_with("ATOM  ") || line.starts_with("HETATM"))
        && line.len() < PDB_LINE_WIDTH
        && [30..38, 38..46, 46..54].into_iter().all(|cols| {
            line.get(cols)
                .is_some_and(|field| field.trim().parse::<f64>().is_ok())
        })
}

/// Load a structure by trial parsing: PDB first, then mmCIF.
pub fn load_structure(path: &Path) -> std::result::Result<LoadedStructure, LoadError> {
    for format in StructureFormat::TRIAL_ORDER {
        match read_structure(path, format) {
            Ok((pdb, warnings)) => {
                debug!("Read {} as {format}", path.display());
                return Ok(LoadedStructure {
                    name: base_name(path),
                    format,
                    pdb,
                    warnings,
                });
            }
            Err(errors) => {
                debug!(
                    "{} is not a readable {format} file ({} error(s))",
                    path.display(),
                    errors.len()
                );
                errors.iter().for_each(|e| debug!("{e}"));
            }
        }
    }

    Err(LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}
