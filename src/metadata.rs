//! Molecule name, organism and resolution for FASTA descriptions.

use crate::cif::CifDict;
use crate::header::PdbHeader;
use crate::utils::StructureFormat;
use std::path::Path;
use tracing::debug;

/// Resolution reported when a file does not state one.
pub const UNKNOWN_RESOLUTION: f64 = -1.0;

const CIF_NAME: &str = "_entity_name_com.name";
const CIF_ORGANISM: &str = "_pdbx_entity_src_syn.organism_scientific";
const CIF_RESOLUTION: &str = "_reflns.d_resolution_high";

/// Descriptive fields shared by every record written for one structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Molecule name
    pub name: Option<String>,
    /// Scientific name of the source organism
    pub organism: Option<String>,
    /// Resolution in Ångströms, or [`UNKNOWN_RESOLUTION`]
    pub resolution: f64,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            name: None,
            organism: None,
            resolution: UNKNOWN_RESOLUTION,
        }
    }
}

impl Metadata {
    /// Collect metadata for a file that was read as `format`. Never fails;
    /// anything missing keeps its default.
    pub fn extract(format: StructureFormat, path: &Path) -> Self {
        let metadata = match format {
            StructureFormat::Pdb => {
                let header = PdbHeader::from_path(path);
                debug!(
                    "PDB entry {} ({}) with {} compound(s)",
                    header.idcode.as_deref().unwrap_or("?"),
                    header.head.as_deref().unwrap_or("unclassified"),
                    header.compound.len()
                );
                Self::from_pdb_header(&header)
            }
            StructureFormat::Mmcif => Self::from_cif_dict(&CifDict::from_path(path)),
        };
        debug!("Metadata for {}: {metadata:?}", path.display());
        metadata
    }

    /// Metadata from PDB header records. The organism of a top-level
    /// `SOURCE` entry wins over the one of molecule `1`.
    pub fn from_pdb_header(header: &PdbHeader) -> Self {
        let organism = header.organism_scientific.clone().or_else(|| {
            header
                .source
                .get("1")
                .and_then(|mol| mol.get("organism_scientific"))
                .cloned()
        });

        Self {
            name: header.name.clone(),
            organism,
            resolution: header.resolution.map_or(UNKNOWN_RESOLUTION, valid_resolution),
        }
    }

    /// Metadata from mmCIF data items.
    pub fn from_cif_dict(dict: &CifDict) -> Self {
        let resolution = dict
            .get_first(CIF_RESOLUTION)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .map_or(UNKNOWN_RESOLUTION, valid_resolution);

        Self {
            name: dict.get_joined(CIF_NAME),
            organism: dict.get_joined(CIF_ORGANISM),
            resolution,
        }
    }

    /// FASTA description: `| <name> | <organism> | Resolution <x.xx> A`.
    pub fn description(&self) -> String {
        format!(
            "| {} | {} | Resolution {:.2} A",
            self.name.as_deref().unwrap_or(""),
            self.organism.as_deref().unwrap_or(""),
            self.resolution
        )
    }
}

/// Negative or non-finite resolutions carry no information.
fn valid_resolution(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        UNKNOWN_RESOLUTION
    }
}
