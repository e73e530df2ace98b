use std::path::Path;

/// Derives a structure identifier from a file path: the file name up to its first `.`.
///
/// `1g16.pdb` and `1g16.clean.pdb` both become `1g16`.
pub fn structure_id_from_path(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let id = file_name.split('.').next().unwrap_or(file_name);
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// The file name component of a path as an owned string, used as a record key
/// in FASTA files and alignments.
pub fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
