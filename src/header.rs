//! Header records of PDB files.
//!
//! `pdbtbx` keeps coordinates but drops most descriptive records, so the
//! metadata needed for FASTA descriptions is read straight from the text.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Molecule specifications of a `COMPND` or `SOURCE` section, keyed by `MOL_ID`.
pub type MolSpecs = BTreeMap<String, BTreeMap<String, String>>;

/// Descriptive fields from the header section of a PDB file.
///
/// Text values are lower-cased, following the usual convention for parsed
/// PDB headers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PdbHeader {
    /// Classification from the `HEADER` record
    pub head: Option<String>,
    /// Four character code from the `HEADER` record
    pub idcode: Option<String>,
    /// Concatenated `TITLE` records
    pub name: Option<String>,
    /// Resolution in Ångströms from `REMARK   2`
    pub resolution: Option<f64>,
    /// Organism given in `SOURCE` outside of any `MOL_ID` block
    pub organism_scientific: Option<String>,
    /// `COMPND` molecules
    pub compound: MolSpecs,
    /// `SOURCE` molecules
    pub source: MolSpecs,
}

impl PdbHeader {
    /// Read the header of a PDB file. Unreadable files give an empty header.
    pub fn from_path(path: &Path) -> Self {
        match File::open(path) {
            Ok(file) => Self::from_lines(BufReader::new(file).lines().map_while(Result::ok)),
            Err(_) => Self::default(),
        }
    }

    /// Parse header records until the first coordinate record.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut header = PdbHeader::default();
        let mut title = String::new();
        let mut compnd = String::new();
        let mut source = String::new();

        for line in lines {
            let line = line.as_ref();
            let record = line.get(..6).unwrap_or(line).trim_end();
            match record {
                "ATOM" | "HETATM" | "MODEL" => break,
                "HEADER" => {
                    let classification = column_range(line, 10, 50).trim();
                    if !classification.is_empty() {
                        header.head = Some(classification.to_lowercase());
                    }
                    let idcode = column_range(line, 62, 66).trim();
                    if !idcode.is_empty() {
                        header.idcode = Some(idcode.to_string());
                    }
                }
                // Continuation numbers sit in columns 9-10, text starts at 11
                "TITLE" => push_continuation(&mut title, column_range(line, 10, 80)),
                "COMPND" => push_continuation(&mut compnd, column_range(line, 10, 80)),
                "SOURCE" => push_continuation(&mut source, column_range(line, 10, 80)),
                "REMARK" if column_range(line, 6, 10).trim() == "2" => {
                    if let Some(res) = parse_resolution(column_range(line, 10, 80)) {
                        header.resolution = Some(res);
                    }
                }
                _ => {}
            }
        }

        if !title.is_empty() {
            header.name = Some(title.to_lowercase());
        }
        header.compound = parse_mol_specs(&compnd).0;
        let (source, loose_source) = parse_mol_specs(&source);
        header.source = source;
        header.organism_scientific = loose_source.get("organism_scientific").cloned();
        header
    }
}

/// Characters `start..end` (0-based) of a line, clipped to its length.
fn column_range(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start.min(end)..end).unwrap_or("")
}

/// Append the text of a continued record, normalizing whitespace.
fn push_continuation(buffer: &mut String, text: &str) {
    for word in text.split_whitespace() {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(word);
    }
}

fn parse_resolution(text: &str) -> Option<f64> {
    let rest = text.trim().strip_prefix("RESOLUTION.")?;
    rest.split_whitespace().next()?.parse::<f64>().ok()
}

/// Split `KEY: value;` tokens by molecule. Tokens seen before any `MOL_ID`
/// are returned separately.
fn parse_mol_specs(text: &str) -> (MolSpecs, BTreeMap<String, String>) {
    let mut specs = MolSpecs::new();
    let mut loose = BTreeMap::new();
    let mut mol_id: Option<String> = None;

    for token in text.split(';') {
        let Some((key, value)) = token.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        if key == "mol_id" {
            specs.entry(value.clone()).or_default();
            mol_id = Some(value);
            continue;
        }
        match &mol_id {
            Some(id) => {
                specs.entry(id.clone()).or_default().insert(key, value);
            }
            None => {
                loose.insert(key, value);
            }
        }
    }

    (specs, loose)
}
