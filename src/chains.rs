use crate::peptides::{Peptide, PeptideBuilder};
use crate::residues::ResidueExt;
use pdbtbx::*;

/// Sequence helpers for [`pdbtbx::Chain`].
pub trait ChainExt {
    /// One-letter codes of every standard amino acid in the chain, gaps ignored.
    fn pdb_seq(&self) -> Vec<&str>;

    /// Polypeptides of the chain, split at breaks in the backbone.
    fn peptides(&self, builder: &PeptideBuilder) -> Vec<Peptide>;
}

impl ChainExt for Chain {
    fn pdb_seq(&self) -> Vec<&str> {
        self.residues().filter_map(|res| res.resn()).collect()
    }

    fn peptides(&self, builder: &PeptideBuilder) -> Vec<Peptide> {
        builder.build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data;
    use crate::utils::load_structure;

    #[test]
    fn test_pdb_seq() {
        let loaded = load_structure(&test_data("hetero.pdb")).unwrap();
        let chain = loaded.pdb.model(0).unwrap().chain(0).unwrap();
        let seq = chain.pdb_seq().join("");
        assert_eq!(seq, "ACDE", "Expected: ACDE\nFound: {seq}");
    }

    #[test]
    fn peptides_cover_chain_without_gaps() {
        let loaded = load_structure(&test_data("broken.pdb")).unwrap();
        let builder = PeptideBuilder::default();
        for chain in loaded.pdb.chains() {
            let joined: String = chain
                .peptides(&builder)
                .into_iter()
                .map(|p| p.sequence)
                .collect();
            assert_eq!(joined, chain.pdb_seq().join(""));
        }
    }
}
