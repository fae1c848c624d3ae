//! Input validation helpers shared by the CLI entry points.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// Maximum number of primer sequences accepted from a single file. The
/// pattern family for each primer grows quadratically with its length at a
/// two-mismatch budget, so this caps the size of the compiled alternation.
pub const MAX_PRIMERS: usize = 10_000;

#[derive(Error, Debug)]
#[error("the same path is used for {first} and {second}: {path}")]
pub struct AliasedPathError {
    pub first: String,
    pub second: String,
    pub path: String,
}

/// Check whether `count` primers already loaded leaves room for one more.
/// Returns a human-readable reason when the limit is hit.
#[must_use]
pub fn check_primer_limit(count: usize) -> Option<String> {
    if count >= MAX_PRIMERS {
        Some(format!(
            "primer file exceeds the maximum of {MAX_PRIMERS} sequences"
        ))
    } else {
        None
    }
}

/// Reject runs where two file roles alias the same path, which would make
/// the output clobber an input.
///
/// Paths are compared after canonicalization when possible, falling back to
/// lexical comparison for paths that do not exist yet (e.g. the output).
///
/// # Errors
///
/// Returns `AliasedPathError` naming the two roles that collide.
pub fn check_distinct_paths(roles: &[(&str, &Path)]) -> Result<(), AliasedPathError> {
    let mut seen: HashMap<std::path::PathBuf, &str> = HashMap::new();

    for (role, path) in roles {
        let resolved = path
            .canonicalize()
            .unwrap_or_else(|_| (*path).to_path_buf());
        if let Some(first) = seen.insert(resolved, role) {
            return Err(AliasedPathError {
                first: first.to_string(),
                second: (*role).to_string(),
                path: path.display().to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_primer_limit() {
        assert!(check_primer_limit(0).is_none());
        assert!(check_primer_limit(MAX_PRIMERS - 1).is_none());
        assert!(check_primer_limit(MAX_PRIMERS).is_some());
    }

    #[test]
    fn test_distinct_paths_pass() {
        let roles = [
            ("input", Path::new("reads.fastq")),
            ("primers", Path::new("primers.fa")),
            ("output", Path::new("clipped.fastq")),
        ];
        assert!(check_distinct_paths(&roles).is_ok());
    }

    #[test]
    fn test_aliased_paths_fail() {
        let roles = [
            ("input", Path::new("reads.fastq")),
            ("output", Path::new("reads.fastq")),
        ];
        let err = check_distinct_paths(&roles).unwrap_err();
        assert_eq!(err.first, "input");
        assert_eq!(err.second, "output");
    }
}
