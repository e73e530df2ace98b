use crate::core::models::residue::Residue;
use phf::{Map, Set, phf_map, phf_set};

static ONE_LETTER_CODES: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
};

static PEPTIDE_BACKBONE_ATOMS: Set<&'static str> = phf_set! { "N", "CA", "C" };

/// Returns the one-letter code of a standard amino acid residue name.
pub fn one_letter_code(residue_name: &str) -> Option<char> {
    ONE_LETTER_CODES.get(residue_name.trim()).copied()
}

pub fn is_standard_amino_acid(residue_name: &str) -> bool {
    ONE_LETTER_CODES.contains_key(residue_name.trim())
}

/// Whether a residue can be part of a peptide chain: a standard amino acid
/// carrying all of N, CA and C.
pub fn is_peptide_residue(residue: &Residue) -> bool {
    is_standard_amino_acid(&residue.name)
        && PEPTIDE_BACKBONE_ATOMS
            .iter()
            .all(|name| residue.atom(name).is_some())
}
