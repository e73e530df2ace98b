use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

const LINE_WIDTH: usize = 60;

/// A single FASTA record. Sequences of alignments keep their gap characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new(id: &str, sequence: &str) -> Self {
        Self {
            id: id.to_string(),
            sequence: sequence.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Sequence data on line {line} appears before any '>' header")]
    MissingHeader { line: usize },
    #[error("Empty record identifier on line {line}")]
    EmptyIdentifier { line: usize },
    #[error("Duplicate record identifier '{0}'")]
    DuplicateIdentifier(String),
}

/// Reads all records, joining multi-line sequences.
///
/// The identifier is the first whitespace-delimited word of the header line.
pub fn read_records(reader: &mut impl BufRead) -> Result<Vec<FastaRecord>, FastaError> {
    let mut records: Vec<FastaRecord> = Vec::new();
    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            let id = header.split_whitespace().next().unwrap_or("");
            if id.is_empty() {
                return Err(FastaError::EmptyIdentifier { line: line_num });
            }
            records.push(FastaRecord::new(id, ""));
        } else {
            let record = records
                .last_mut()
                .ok_or(FastaError::MissingHeader { line: line_num })?;
            record.sequence.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }
    Ok(records)
}

pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<FastaRecord>, FastaError> {
    let file = File::open(path)?;
    read_records(&mut BufReader::new(file))
}

/// Reads records into a map keyed by identifier, rejecting duplicates.
pub fn read_record_map<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>, FastaError> {
    let mut map = HashMap::new();
    for record in read_records_from_path(path)? {
        if map.contains_key(&record.id) {
            return Err(FastaError::DuplicateIdentifier(record.id));
        }
        map.insert(record.id, record.sequence);
    }
    Ok(map)
}

/// Writes records with sequences wrapped at 60 columns.
pub fn write_records(records: &[FastaRecord], writer: &mut impl Write) -> Result<(), FastaError> {
    for record in records {
        writeln!(writer, ">{}", record.id)?;
        let chars: Vec<char> = record.sequence.chars().collect();
        if chars.is_empty() {
            writeln!(writer)?;
        }
        for chunk in chars.chunks(LINE_WIDTH) {
            writeln!(writer, "{}", chunk.iter().collect::<String>())?;
        }
    }
    Ok(())
}

pub fn write_records_to_path<P: AsRef<Path>>(
    records: &[FastaRecord],
    path: P,
) -> Result<(), FastaError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_records(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}
