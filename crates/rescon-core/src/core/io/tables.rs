use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub const NETWORK_HEADER: [&str; 3] = ["pdb_id", "res_A", "res_B"];
pub const CHAIN_SELECTION_HEADER: [&str; 2] = ["pdb_id", "chain"];
pub const MAPPING_HEADER: [&str; 6] = ["pdb_id", "resnum", "pdb", "alignment_pos", "aa", "ref_pdb"];

/// One contact edge: residue numbers are 1-based positions in structure order.
///
/// Field order defines the row ordering of a sorted network table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContactRow {
    pub pdb_id: String,
    #[serde(rename = "res_A")]
    pub res_a: usize,
    #[serde(rename = "res_B")]
    pub res_b: usize,
}

impl ContactRow {
    pub fn new(pdb_id: &str, res_a: usize, res_b: usize) -> Self {
        Self {
            pdb_id: pdb_id.to_string(),
            res_a,
            res_b,
        }
    }
}

/// The concatenated contact networks of many structures.
///
/// Tables are combined with [`NetworkTable::merge`], so each structure's rows
/// can be produced in isolation and folded together afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkTable {
    rows: Vec<ContactRow>,
}

impl NetworkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<ContactRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ContactRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn extend<I: IntoIterator<Item = ContactRow>>(&mut self, rows: I) {
        self.rows.extend(rows);
    }

    pub fn merge(mut self, other: NetworkTable) -> NetworkTable {
        self.rows.extend(other.rows);
        self
    }

    /// Sorts rows by `(pdb_id, res_A, res_B)`.
    pub fn sort(&mut self) {
        self.rows.sort_unstable();
    }

    pub fn write_csv(&self, writer: impl Write) -> Result<(), TableError> {
        write_rows(&self.rows, &NETWORK_HEADER, writer)
    }

    pub fn write_csv_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        self.write_csv(File::create(path)?)
    }

    pub fn read_csv(reader: impl Read) -> Result<Self, TableError> {
        Ok(Self::from_rows(read_rows(reader)?))
    }

    pub fn read_csv_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        Self::read_csv(File::open(path)?)
    }
}

/// The chain picked for one structure during preparation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainSelectionRow {
    pub pdb_id: String,
    pub chain: char,
}

/// Position of one residue in the reference alignment and the equivalent
/// residue of the reference structure, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    pub pdb_id: String,
    pub resnum: usize,
    pub pdb: Option<isize>,
    pub alignment_pos: usize,
    pub aa: String,
    pub ref_pdb: Option<isize>,
}

/// One line of the SIFTS `pdb_chain_pfam.csv` table. Other columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainPfamRow {
    #[serde(rename = "PDB")]
    pub pdb: String,
    #[serde(rename = "CHAIN")]
    pub chain: String,
    #[serde(rename = "PFAM_ID")]
    pub pfam_id: String,
}

/// The SIFTS chain-to-Pfam-domain assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainPfamTable {
    rows: Vec<ChainPfamRow>,
}

impl ChainPfamTable {
    /// Reads the table, skipping `#` comment lines.
    pub fn read_csv(reader: impl Read) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let rows = csv_reader
            .deserialize()
            .collect::<Result<Vec<ChainPfamRow>, csv::Error>>()?;
        Ok(Self { rows })
    }

    pub fn read_csv_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        Self::read_csv(File::open(path)?)
    }

    pub fn rows(&self) -> &[ChainPfamRow] {
        &self.rows
    }

    /// Chains of `pdb_id` carrying `pfam_id`, in table order. Identifiers compare
    /// case-insensitively.
    pub fn chains_with_domain(&self, pdb_id: &str, pfam_id: &str) -> Vec<char> {
        self.rows
            .iter()
            .filter(|r| r.pdb.eq_ignore_ascii_case(pdb_id) && r.pfam_id.eq_ignore_ascii_case(pfam_id))
            .filter_map(|r| r.chain.chars().next())
            .collect()
    }
}

/// Writes `rows` with an explicit header line, so empty tables still carry one.
pub fn write_rows<T: Serialize>(
    rows: &[T],
    header: &[&str],
    writer: impl Write,
) -> Result<(), TableError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_rows_to_path<T: Serialize, P: AsRef<Path>>(
    rows: &[T],
    header: &[&str],
    path: P,
) -> Result<(), TableError> {
    write_rows(rows, header, File::create(path)?)
}

pub fn read_rows<T: DeserializeOwned>(reader: impl Read) -> Result<Vec<T>, TableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader.deserialize().collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string<T: Serialize>(rows: &[T], header: &[&str]) -> String {
        let mut buffer = Vec::new();
        write_rows(rows, header, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn network_table_sorts_by_id_then_residues() {
        let mut table = NetworkTable::from_rows(vec![
            ContactRow::new("1gwn", 1, 5),
            ContactRow::new("1g16", 2, 3),
            ContactRow::new("1g16", 1, 42),
            ContactRow::new("1g16", 1, 7),
        ]);
        table.sort();

        let ordered: Vec<_> = table
            .rows()
            .iter()
            .map(|r| (r.pdb_id.as_str(), r.res_a, r.res_b))
            .collect();
        assert_eq!(
            ordered,
            vec![("1g16", 1, 7), ("1g16", 1, 42), ("1g16", 2, 3), ("1gwn", 1, 5)]
        );
    }

    #[test]
    fn network_csv_has_expected_header_and_rows() {
        let table = NetworkTable::from_rows(vec![ContactRow::new("1g16", 1, 42)]);
        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "pdb_id,res_A,res_B\n1g16,1,42\n");
    }

    #[test]
    fn empty_network_csv_still_has_header() {
        let mut buffer = Vec::new();
        NetworkTable::new().write_csv(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "pdb_id,res_A,res_B\n");
    }

    #[test]
    fn network_csv_reads_back() {
        let table = NetworkTable::from_rows(vec![
            ContactRow::new("1g16", 1, 42),
            ContactRow::new("1g16", 3, 4),
        ]);
        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        assert_eq!(NetworkTable::read_csv(buffer.as_slice()).unwrap(), table);
    }

    #[test]
    fn merge_concatenates_rows() {
        let a = NetworkTable::from_rows(vec![ContactRow::new("a", 1, 2)]);
        let b = NetworkTable::from_rows(vec![ContactRow::new("b", 1, 3)]);
        let merged = a.merge(b);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.rows()[1].pdb_id, "b");
    }

    #[test]
    fn mapping_rows_leave_missing_values_empty() {
        let rows = vec![MappingRow {
            pdb_id: "1gwn".into(),
            resnum: 2,
            pdb: Some(23),
            alignment_pos: 16,
            aa: "LYS".into(),
            ref_pdb: None,
        }];
        assert_eq!(
            write_to_string(&rows, &MAPPING_HEADER),
            "pdb_id,resnum,pdb,alignment_pos,aa,ref_pdb\n1gwn,2,23,16,LYS,\n"
        );
    }

    #[test]
    fn chain_selection_rows_serialize_chain_as_text() {
        let rows = vec![ChainSelectionRow {
            pdb_id: "1g16".into(),
            chain: 'A',
        }];
        assert_eq!(
            write_to_string(&rows, &CHAIN_SELECTION_HEADER),
            "pdb_id,chain\n1g16,A\n"
        );
    }

    #[test]
    fn chain_pfam_table_skips_comments_and_extra_columns() {
        let content = "\
# 2016/05/10 - 10:22 | PDB: 19.16 | UniProt: 2016.05
PDB,CHAIN,SP_PRIMARY,PFAM_ID,COVERAGE
1g16,B,P01123,PF00071,0.96
1g16,A,P01123,PF00071,0.96
1g16,C,P99999,PF00001,1.0
1GWN,A,P61587,PF00071,0.93
";
        let table = ChainPfamTable::read_csv(content.as_bytes()).unwrap();
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.chains_with_domain("1g16", "PF00071"), vec!['B', 'A']);
        assert_eq!(table.chains_with_domain("1gwn", "pf00071"), vec!['A']);
        assert!(table.chains_with_domain("4mit", "PF00071").is_empty());
    }
}
