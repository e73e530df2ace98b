use crate::core::models::atom::{Atom, RecordKind};
use crate::core::models::builder::MolecularSystemBuilder;
use crate::core::models::structure::Structure;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Non-coordinate lines preceding the first model (HEADER, TITLE, REMARK, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub header_lines: Vec<String>,
    pub model_count: usize,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

const MIN_ATOM_LINE_LEN: usize = 54;

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn char_at(line: &str, idx: usize) -> Option<char> {
    line.get(idx..idx + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Fixed-column reader and writer for the Protein Data Bank format.
///
/// Only the first model is read. Alternate locations other than blank or `A`
/// are skipped so that every atom appears once.
pub struct PdbFile;

impl PdbFile {
    pub fn read_from(reader: impl BufRead) -> Result<(MolecularSystem, PdbMetadata), PdbError> {
        let mut builder = MolecularSystemBuilder::new();
        let mut metadata = PdbMetadata::default();
        let mut atom_count = 0usize;
        let mut in_first_model = true;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "ATOM" | "HETATM" => {
                    if !in_first_model {
                        continue;
                    }
                    if line.len() < MIN_ATOM_LINE_LEN {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let alt_loc = char_at(&line, 16);
                    if !matches!(alt_loc, None | Some('A')) {
                        continue;
                    }

                    let serial_str = slice_and_trim(&line, 6, 11);
                    let name_str = slice_and_trim(&line, 12, 16);
                    let res_name_str = slice_and_trim(&line, 17, 20);
                    let chain_id = char_at(&line, 21).unwrap_or(' ');
                    let res_seq_str = slice_and_trim(&line, 22, 26);
                    let insertion_code = char_at(&line, 26);
                    let element_str = slice_and_trim(&line, 76, 78);

                    if name_str.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let serial: usize = serial_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "7-11".into(),
                            value: serial_str.into(),
                        },
                    })?;
                    let res_seq: Option<isize> = if res_seq_str.is_empty() {
                        None
                    } else {
                        Some(res_seq_str.parse().map_err(|_| PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::InvalidInt {
                                columns: "23-26".into(),
                                value: res_seq_str.into(),
                            },
                        })?)
                    };
                    let x = parse_float(&line, line_num, 30, 38)?;
                    let y = parse_float(&line, line_num, 38, 46)?;
                    let z = parse_float(&line, line_num, 46, 54)?;
                    let record = RecordKind::from_str(record_type).unwrap_or_default();

                    builder.start_chain(chain_id);
                    builder.start_residue(res_name_str, res_seq, insertion_code);
                    builder.add_atom(
                        Atom::new(serial, name_str, Point3::new(x, y, z))
                            .with_element(element_str)
                            .with_record(record),
                    );
                    atom_count += 1;
                }
                "MODEL" => metadata.model_count += 1,
                "ENDMDL" => in_first_model = false,
                "END" => break,
                "TER" | "ANISOU" | "CONECT" | "MASTER" => {}
                _ => {
                    if atom_count == 0 && !line.trim().is_empty() {
                        metadata.header_lines.push(line);
                    }
                }
            }
        }

        if atom_count == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        metadata.model_count = metadata.model_count.max(1);
        Ok((builder.build(), metadata))
    }

    pub fn write_to(
        system: &MolecularSystem,
        metadata: &PdbMetadata,
        writer: &mut impl Write,
    ) -> Result<(), PdbError> {
        for line in &metadata.header_lines {
            writeln!(writer, "{}", line)?;
        }

        let mut serial = 0usize;
        for chain in system.chains() {
            let mut last_residue = None;
            for residue in chain.residues() {
                for atom in residue.atoms() {
                    serial += 1;
                    writeln!(
                        writer,
                        "{:<6}{:>5} {:<4} {:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                        atom.record.as_record_name(),
                        serial,
                        format_atom_name(&atom.name, &atom.element),
                        residue.name,
                        chain.id,
                        residue.number.map(|n| n.to_string()).unwrap_or_default(),
                        residue.insertion_code.unwrap_or(' '),
                        atom.position.x,
                        atom.position.y,
                        atom.position.z,
                        1.0,
                        0.0,
                        atom.element,
                    )?;
                }
                last_residue = Some(residue);
            }
            if let Some(residue) = last_residue {
                serial += 1;
                writeln!(
                    writer,
                    "TER   {:>5}      {:>3} {}{:>4}{}",
                    serial,
                    residue.name,
                    chain.id,
                    residue.number.map(|n| n.to_string()).unwrap_or_default(),
                    residue.insertion_code.unwrap_or(' '),
                )?;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(MolecularSystem, PdbMetadata), PdbError> {
        Self::read_from(BufReader::new(File::open(path)?))
    }

    /// Reads the file at `path` as the structure `id`: every residue of the
    /// first model, chains in file order, anchored on the default atom.
    pub fn read_structure<P: AsRef<Path>>(path: P, id: &str) -> Result<Structure, PdbError> {
        let (system, _) = Self::read_from_path(path)?;
        Ok(Structure::from_system(id, &system))
    }

    /// Writes `system` to `path`, replacing any existing file.
    pub fn write_to_path<P: AsRef<Path>>(
        system: &MolecularSystem,
        metadata: &PdbMetadata,
        path: P,
    ) -> Result<(), PdbError> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(system, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Atom names of one-letter elements start in column 14, all others in column 13.
fn format_atom_name(name: &str, element: &str) -> String {
    if name.len() < 4 && element.len() <= 1 {
        format!(" {:<3}", name)
    } else {
        format!("{:<4}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
HEADER    HYDROLASE                               01-JAN-00   1ABC
REMARK   2 RESOLUTION.    1.80 ANGSTROMS.
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  HA  ALA A   1      12.639   6.071  -5.147  1.00  0.00           H
ATOM      4  N  AGLY A   2      12.104   7.134  -4.504  0.50  0.00           N
ATOM      5  N  BGLY A   2      12.204   7.234  -4.604  0.50  0.00           N
ATOM      6  CA  GLY A   2      13.639   7.071  -3.147  1.00  0.00           C
TER       7      GLY A   2
HETATM    8  O   HOH B 101      20.000  20.000  20.000  1.00  0.00           O
END
";

    fn read(content: &str) -> Result<(MolecularSystem, PdbMetadata), PdbError> {
        PdbFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_atoms_residues_and_chains() {
        let (system, metadata) = read(SAMPLE).unwrap();

        assert_eq!(system.chains().len(), 2);
        let chain_a = system.chain('A').unwrap();
        assert_eq!(chain_a.residues().len(), 2);
        assert_eq!(chain_a.residues()[0].name, "ALA");
        assert_eq!(chain_a.residues()[0].number, Some(1));
        assert_eq!(chain_a.atom_count(), 5);

        let ca = chain_a.residues()[0].anchor().unwrap();
        assert_eq!(ca.serial, 2);
        assert_eq!(ca.position, Point3::new(11.639, 6.071, -5.147));

        assert_eq!(metadata.header_lines.len(), 2);
        assert_eq!(metadata.model_count, 1);
    }

    #[test]
    fn keeps_only_blank_or_first_alternate_location() {
        let (system, _) = read(SAMPLE).unwrap();
        let glycine = &system.chain('A').unwrap().residues()[1];
        let nitrogens: Vec<_> = glycine.atoms().iter().filter(|a| a.name == "N").collect();
        assert_eq!(nitrogens.len(), 1);
        assert_eq!(nitrogens[0].serial, 4);
    }

    #[test]
    fn records_element_and_record_kind() {
        let (system, _) = read(SAMPLE).unwrap();
        let water = &system.chain('B').unwrap().residues()[0];
        assert!(water.atoms()[0].is_hetero());
        let alanine = &system.chain('A').unwrap().residues()[0];
        assert!(alanine.atoms()[2].is_hydrogen());
    }

    #[test]
    fn reads_only_first_model() {
        let content = "\
MODEL        1
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  CA  ALA A   1       1.000   1.000   1.000  1.00  0.00           C
ENDMDL
";
        let (system, metadata) = read(content).unwrap();
        assert_eq!(system.atom_count(), 1);
        assert_eq!(metadata.model_count, 2);
    }

    #[test]
    fn infers_element_when_columns_are_missing() {
        let content = "ATOM      1 HG21 THR A   5       0.000   0.000   0.000\n";
        let (system, _) = read(content).unwrap();
        assert!(system.atoms().next().unwrap().is_hydrogen());
    }

    #[test]
    fn short_atom_line_is_an_error() {
        let err = read("ATOM      1  CA  ALA A   1       0.000   0.000\n").unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::LineTooShort
            }
        ));
    }

    #[test]
    fn invalid_coordinate_reports_columns() {
        let content = "ATOM      1  CA  ALA A   1       0.000   abcde   0.000  1.00  0.00           C\n";
        let err = read(content).unwrap_err();
        match err {
            PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { columns, value },
                ..
            } => {
                assert_eq!(columns, "39-46");
                assert_eq!(value, "abcde");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_residue_number_is_an_error() {
        let content = "ATOM      1  CA  ALA A   X       0.000   0.000   0.000  1.00  0.00           C\n";
        assert!(matches!(
            read(content).unwrap_err(),
            PdbError::Parse {
                kind: PdbParseErrorKind::InvalidInt { .. },
                ..
            }
        ));
    }

    #[test]
    fn file_without_atoms_is_an_error() {
        let err = read("HEADER    EMPTY\nEND\n").unwrap_err();
        assert!(matches!(err, PdbError::MissingRecord(_)));
    }

    #[test]
    fn written_file_reads_back_to_same_geometry() {
        let (system, _) = read(SAMPLE).unwrap();
        let mut buffer = Vec::new();
        PdbFile::write_to(&system, &PdbMetadata::default(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.lines().any(|l| l.starts_with("TER")));
        assert!(text.trim_end().ends_with("END"));

        let (reread, _) = read(&text).unwrap();
        let original = Structure::from_system("x", &system);
        let copy = Structure::from_system("x", &reread);
        assert_eq!(original.len(), copy.len());
        for (a, b) in original.residues().iter().zip(copy.residues()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.number, b.number);
            assert_eq!(a.atoms().len(), b.atoms().len());
            for (x, y) in a.atoms().iter().zip(b.atoms()) {
                assert_eq!(x.name, y.name);
                assert_eq!(x.element, y.element);
                assert!((x.position - y.position).norm() < 1e-3);
            }
        }
    }

    #[test]
    fn read_structure_flattens_chains_and_anchors_on_ca() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1abc.pdb");
        std::fs::write(&path, SAMPLE).unwrap();

        let structure = PdbFile::read_structure(&path, "1abc").unwrap();
        assert_eq!(structure.id, "1abc");
        assert_eq!(structure.len(), 3);
        assert_eq!(structure.anchor_atom(), "CA");
        assert_eq!(
            structure.residues()[1].anchor().map(|a| a.serial),
            Some(6)
        );
        assert!(structure.residues()[2].anchor().is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdbFile::read_structure(dir.path().join("none.pdb"), "none").unwrap_err();
        assert!(matches!(err, PdbError::Io(_)));
    }

    #[test]
    fn atom_names_are_aligned_by_element_width() {
        assert_eq!(format_atom_name("CA", "C"), " CA ");
        assert_eq!(format_atom_name("HG21", "H"), "HG21");
        assert_eq!(format_atom_name("FE", "FE"), "FE  ");
    }
}
