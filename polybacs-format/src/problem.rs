use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A problem being converted.
///
/// The problem is filled in stages: the unpacker sets the source name and the materials folder,
/// the Polygon reader fills the metadata and the paths of the files to copy, the BACS assembler
/// sets the preparation folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Problem {
    /// Name of the source archive up to the first `.`.
    pub source_name: String,
    /// Stable identifier of the problem, used for the names of the output archive and of the
    /// preparation folder.
    pub short_name: String,
    /// Human readable title of the problem.
    pub full_name: String,
    /// Who maintains the problem.
    pub maintainers: String,
    /// Time limit of a single test, in milliseconds.
    pub time_limit_millis: u64,
    /// Memory limit of a single test, in bytes.
    pub memory_limit_bytes: u64,
    /// Root of the extracted source package.
    pub materials_folder: PathBuf,
    /// Root of the assembled target package.
    pub preparation_folder: PathBuf,
    /// Source file of the checker.
    pub checker: PathBuf,
    /// The PDF statement, if any.
    pub statement: Option<PathBuf>,
    /// The reference solutions.
    pub solutions: Vec<PathBuf>,
    /// The tests, sorted by number.
    pub tests: Vec<TestCase>,
}

/// A test of the problem: a pair of input and expected output files sharing the same number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// The number of the test, starting from 1.
    pub number: u32,
    /// Path of the input file.
    pub input: PathBuf,
    /// Path of the expected output file.
    pub output: PathBuf,
}

impl Problem {
    /// Make a new problem extracted in `materials_folder` from the archive named `source_name`.
    pub fn new<S: Into<String>, P: Into<PathBuf>>(source_name: S, materials_folder: P) -> Problem {
        Problem {
            source_name: source_name.into(),
            materials_folder: materials_folder.into(),
            ..Default::default()
        }
    }

    /// The time limit expressed in whole seconds, rounded down.
    pub fn time_limit_seconds(&self) -> u64 {
        self.time_limit_millis / 1000
    }

    /// The memory limit expressed in whole mebibytes, rounded down.
    pub fn memory_limit_mib(&self) -> u64 {
        self.memory_limit_bytes / 1024 / 1024
    }
}
