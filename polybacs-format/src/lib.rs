//! Problem package parsing and assembling.
//!
//! This crate reads problem packages in the Polygon format (already extracted on disk) into a
//! [`Problem`], and assembles a directory tree in the BACS format from it. Archive handling is not
//! part of this crate.

#![deny(missing_docs)]

#[macro_use]
extern crate log;

use std::path::{Path, PathBuf};

pub use problem::{Problem, TestCase};

pub mod bacs;
pub mod polygon;
mod problem;

/// The maintainers written in `config.ini` when nothing else is specified.
pub const DEFAULT_MAINTAINERS: &str = "Musin";

/// Configuration of the conversion of a problem.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Copy the reference solutions into `misc/solution/`.
    pub include_solutions: bool,
    /// Prefix of the top level directory inside the produced archive. The short name of the
    /// problem is appended to it.
    pub entry_prefix: Option<String>,
    /// Use `<stem>.pdf`, next to the source archive, as the statement when it exists.
    pub statement_from_sibling: bool,
    /// Language of the statement bundled in the package (`statements/.pdf/<language>/`).
    pub statement_language: String,
    /// The maintainers of the problem.
    pub maintainers: String,
    /// File name suffixes that mark the expected output of a test.
    pub output_markers: Vec<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            include_solutions: true,
            entry_prefix: None,
            statement_from_sibling: true,
            statement_language: "english".into(),
            maintainers: DEFAULT_MAINTAINERS.into(),
            output_markers: vec![".a".into(), ".ans".into(), ".out".into()],
        }
    }
}

impl ConversionConfig {
    /// The prefix of every entry of the archive of the problem with the specified short name, if
    /// a prefix is configured.
    ///
    /// The configured prefix is separated from the short name with a `-`, unless it already ends
    /// with one.
    pub fn entry_prefix_for(&self, short_name: &str) -> Option<String> {
        let prefix = self.entry_prefix.as_deref().filter(|p| !p.is_empty())?;
        if prefix.ends_with('-') {
            Some(format!("{}{}", prefix, short_name))
        } else {
            Some(format!("{}-{}", prefix, short_name))
        }
    }
}

/// Return the list of files that match the patterns, relative to `cwd`, sorted by path.
/// Directories are skipped.
pub fn list_files<P: AsRef<Path>, S: AsRef<str>>(cwd: P, patterns: Vec<S>) -> Vec<PathBuf> {
    let mut results = Vec::new();
    let cwd = glob::Pattern::escape(&cwd.as_ref().to_string_lossy());
    for pattern in patterns.into_iter() {
        let pattern = format!("{}/{}", cwd, pattern.as_ref());
        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid pattern {}: {}", pattern, e);
                continue;
            }
        };
        results.extend(paths.flatten().filter(|p| p.is_file()));
    }
    results.sort();
    results
}
