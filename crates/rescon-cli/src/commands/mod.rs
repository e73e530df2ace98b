pub mod check;
pub mod contacts;
pub mod map;
pub mod prepare;
pub mod sequences;

use crate::error::{CliError, Result};
use rescon::workflows;
use std::path::{Path, PathBuf};

/// Creates the parent directory of an output file if it does not exist yet.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Lists the structure files of `dir`, rejecting an empty directory.
pub(crate) fn structure_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let files = workflows::list_structure_files(dir)?;
    if files.is_empty() {
        return Err(CliError::Argument(format!(
            "no structure files found in '{}'",
            dir.display()
        )));
    }
    Ok(files)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fmt::Write;
    use std::path::Path;

    /// Writes a one-chain PDB file with one CA atom per `x` coordinate.
    pub fn write_ca_trace(dir: &Path, name: &str, xs: &[f64]) {
        let mut text = String::new();
        for (i, x) in xs.iter().enumerate() {
            writeln!(
                text,
                "ATOM  {:>5}  CA  GLY A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C",
                i + 1,
                i + 1,
                x,
                0.0,
                0.0
            )
            .unwrap();
        }
        text.push_str("END\n");
        std::fs::write(dir.join(name), text).unwrap();
    }
}
