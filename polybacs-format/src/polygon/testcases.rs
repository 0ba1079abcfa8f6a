use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Error};
use thiserror::Error;

use crate::{list_files, TestCase};

/// Why the files of the tests directory cannot be paired into tests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairingError {
    /// The file name does not start with a positive test number.
    #[error("{file:?} does not start with a valid test number")]
    InvalidNumber {
        /// The offending file.
        file: PathBuf,
    },
    /// A test number is shared by a number of files other than two.
    #[error("Test {number} has {} files instead of 2: {files:?}", .files.len())]
    GroupSize {
        /// The number of the test.
        number: u32,
        /// All the files of the test.
        files: Vec<PathBuf>,
    },
    /// Either none or both the files of a test look like an expected output.
    #[error("Cannot tell which is the output of test {number} between {first:?} and {second:?}")]
    AmbiguousRoles {
        /// The number of the test.
        number: u32,
        /// The first file of the test, in path order.
        first: PathBuf,
        /// The second file of the test, in path order.
        second: PathBuf,
    },
}

/// Pair the files of a Polygon tests directory into tests.
///
/// The number of a file is the part of its name before the first `.`; each number must be shared
/// by exactly two files. The file whose name ends with one of `output_markers` is the expected
/// output, the other one is the input. The content of the files is never looked at.
///
/// The tests are returned sorted by number.
pub fn pair_tests<I, S>(files: I, output_markers: &[S]) -> Result<Vec<TestCase>, PairingError>
where
    I: IntoIterator<Item = PathBuf>,
    S: AsRef<str>,
{
    let mut groups: BTreeMap<u32, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let number = test_number(&file).ok_or_else(|| PairingError::InvalidNumber {
            file: file.clone(),
        })?;
        groups.entry(number).or_default().push(file);
    }

    groups
        .into_iter()
        .map(|(number, mut files)| {
            files.sort();
            let [first, second] = match <[PathBuf; 2]>::try_from(files) {
                Ok(pair) => pair,
                Err(files) => return Err(PairingError::GroupSize { number, files }),
            };
            match (
                is_output(&first, output_markers),
                is_output(&second, output_markers),
            ) {
                (true, false) => Ok(TestCase {
                    number,
                    input: second,
                    output: first,
                }),
                (false, true) => Ok(TestCase {
                    number,
                    input: first,
                    output: second,
                }),
                _ => Err(PairingError::AmbiguousRoles {
                    number,
                    first,
                    second,
                }),
            }
        })
        .collect()
}

/// List the files inside `tests_dir` and pair them into tests. Directories are ignored.
pub fn read_tests<P: AsRef<Path>, S: AsRef<str>>(
    tests_dir: P,
    output_markers: &[S],
) -> Result<Vec<TestCase>, Error> {
    let tests_dir = tests_dir.as_ref();
    if !tests_dir.is_dir() {
        bail!("Cannot list the tests in {}: not a directory", tests_dir.display());
    }
    let files = list_files(tests_dir, vec!["*"]);
    let tests = pair_tests(files, output_markers)
        .with_context(|| format!("Invalid tests in {}", tests_dir.display()))?;
    debug!("Found {} tests in {}", tests.len(), tests_dir.display());
    Ok(tests)
}

fn test_number(path: &Path) -> Option<u32> {
    let name = path.file_name()?.to_string_lossy();
    let stem = name.split('.').next()?;
    if !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok().filter(|&n| n > 0)
}

fn is_output<S: AsRef<str>>(path: &Path, output_markers: &[S]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    output_markers
        .iter()
        .any(|marker| name.ends_with(marker.as_ref()))
}
