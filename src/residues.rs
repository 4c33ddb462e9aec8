use pdbtbx::*;

/// Sequence helpers for [`pdbtbx::Residue`].
pub trait ResidueExt {
    /// The residue one-letter code, or `None` if it's not a standard amino acid.
    fn resn(&self) -> Option<&'static str>;

    /// All atoms with the given name, each with the alternate location of its conformer.
    fn atoms_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (Option<&'a str>, &'a Atom)> + 'a;
}

impl ResidueExt for Residue {
    fn resn(&self) -> Option<&'static str> {
        let aa_code = match self.name()?.to_uppercase().as_str() {
            "ALA" => "A",
            "ARG" => "R",
            "ASN" => "N",
            "ASP" => "D",
            "CYS" => "C",
            "GLN" => "Q",
            "GLU" => "E",
            "GLY" => "G",
            "HIS" => "H",
            "ILE" => "I",
            "LEU" => "L",
            "LYS" => "K",
            "MET" => "M",
            "PHE" => "F",
            "PRO" => "P",
            "SER" => "S",
            "THR" => "T",
            "TRP" => "W",
            "TYR" => "Y",
            "VAL" => "V",
            _ => "X",
        };

        match aa_code {
            "X" => None,
            _ => Some(aa_code),
        }
    }

    fn atoms_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (Option<&'a str>, &'a Atom)> + 'a {
        self.conformers().flat_map(move |conformer| {
            let altloc = conformer.alternative_location();
            conformer
                .atoms()
                .filter(move |atom| atom.name() == name)
                .map(move |atom| (altloc, atom))
        })
    }
}
