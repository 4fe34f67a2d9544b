use crate::Kinetics::stoichiometry_matrix::StoichError;
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads reaction equations from a text file, one per line.
/// Blank lines and lines starting with '#' are skipped; the equations are not parsed here.
pub fn load_reactions_from_file<P: AsRef<Path>>(file_name: P) -> Result<Vec<String>, StoichError> {
    let path = file_name.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut reactions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        reactions.push(trimmed.to_string());
    }
    if reactions.is_empty() {
        warn!("file '{}' contains no reactions", path.display());
    } else {
        info!(
            "{} reactions loaded from file '{}'",
            reactions.len(),
            path.display()
        );
    }
    Ok(reactions)
}
