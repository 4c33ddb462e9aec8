//! Splitting chains into polypeptides.
//!
//! A chain becomes several polypeptides wherever consecutive residues are not
//! joined by a peptide bond, which happens at unresolved loops, at
//! non-standard residues and at ligands or waters filed under the chain.

use crate::residues::ResidueExt;
use pdbtbx::*;

/// A maximal run of bonded standard amino acids within a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peptide {
    /// Position of the peptide within its chain, starting at 0
    pub index: usize,
    /// One-letter amino acid sequence
    pub sequence: String,
}

/// Builds peptides from chains using a C–N distance test between neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeptideBuilder {
    radius: f64,
}

impl Default for PeptideBuilder {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
        }
    }
}

impl PeptideBuilder {
    /// Largest C–N distance (Å) still counted as a peptide bond.
    pub const DEFAULT_RADIUS: f64 = 1.8;

    /// Builder with a custom C–N bond radius in Å.
    pub fn with_radius(radius: f64) -> Self {
        Self { radius }
    }

    /// Whether the carbonyl C of `prev` is bonded to the amide N of `next`.
    ///
    /// Alternate locations are only paired with themselves or with atoms that
    /// have no alternate location.
    pub fn is_connected(&self, prev: &Residue, next: &Residue) -> bool {
        prev.atoms_named("C").any(|(c_altloc, c)| {
            next.atoms_named("N").any(|(n_altloc, n)| {
                same_location(c_altloc, n_altloc) && c.distance(n) < self.radius
            })
        })
    }

    /// Runs of residues forming polypeptides, in chain order.
    ///
    /// A residue that is not a standard amino acid ends the current run, and a
    /// lone residue never forms a run by itself.
    pub fn segments<'a>(&self, chain: &'a Chain) -> Vec<Vec<&'a Residue>> {
        let mut segments: Vec<Vec<&Residue>> = Vec::new();
        let mut prev: Option<&Residue> = None;
        let mut open = false;

        for res in chain.residues() {
            if res.resn().is_none() {
                prev = None;
                open = false;
                continue;
            }

            if let Some(prev_res) = prev {
                if !self.is_connected(prev_res, res) {
                    open = false;
                } else if open {
                    if let Some(segment) = segments.last_mut() {
                        segment.push(res);
                    }
                } else {
                    segments.push(vec![prev_res, res]);
                    open = true;
                }
            }
            prev = Some(res);
        }

        segments
    }

    /// Peptides of a chain in discovery order, indexed from 0.
    pub fn build(&self, chain: &Chain) -> Vec<Peptide> {
        self.segments(chain)
            .into_iter()
            .enumerate()
            .map(|(index, residues)| Peptide {
                index,
                sequence: residues.iter().filter_map(|res| res.resn()).collect(),
            })
            .collect()
    }
}

fn same_location(a: Option<&str>, b: Option<&str>) -> bool {
    a.is_none() || b.is_none() || a == b
}
