//! Reading of problem packages in the Polygon format.
//!
//! A Polygon package, once extracted, looks like this:
//!
//! ```text
//! problem.xml            metadata: short name, names, limits
//! check.cpp              source of the checker
//! statements/.pdf/<language>/problem.pdf
//! solutions/             reference solutions, with a `.desc` file each
//! tests/01 tests/01.a    input and expected output of each test
//! ```
//!
//! Only the files listed above are looked at, everything else in the package is ignored.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Error};
use polybacs_diagnostics::{Diagnostic, DiagnosticContext};

use crate::{list_files, ConversionConfig, Problem};

pub use problem_xml::{parse_problem_xml, ProblemMetadata};
pub use testcases::{pair_tests, read_tests, PairingError};

mod problem_xml;
mod testcases;

/// Path of the metadata file, relative to the package root.
pub const PROBLEM_XML: &str = "problem.xml";
/// Path of the checker, relative to the package root.
pub const CHECKER: &str = "check.cpp";
/// Directory with the reference solutions, relative to the package root.
pub const SOLUTIONS_DIR: &str = "solutions";
/// Directory with the tests, relative to the package root.
pub const TESTS_DIR: &str = "tests";
/// Suffix of the files describing a solution, which are not solutions themselves.
pub const SOLUTION_DESCRIPTION_SUFFIX: &str = ".desc";

/// Fill `problem` with the content of the Polygon package extracted in its materials folder.
///
/// `source_archive` is the archive the package was extracted from, used for finding the statement
/// next to it.
pub fn read_problem(
    problem: &mut Problem,
    source_archive: &Path,
    config: &ConversionConfig,
    diagnostics: &mut DiagnosticContext,
) -> Result<(), Error> {
    read_metadata(problem, config, diagnostics).context("Cannot read the problem metadata")?;
    read_checker(problem)?;
    read_statement(problem, source_archive, config, diagnostics);
    read_solutions(problem, diagnostics);
    problem.tests = read_tests(
        problem.materials_folder.join(TESTS_DIR),
        &config.output_markers,
    )?;
    Ok(())
}

fn read_metadata(
    problem: &mut Problem,
    config: &ConversionConfig,
    diagnostics: &mut DiagnosticContext,
) -> Result<(), Error> {
    let path = problem.materials_folder.join(PROBLEM_XML);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let metadata = parse_problem_xml(&content)?;

    problem.short_name = match metadata.short_name {
        Some(short_name) => short_name,
        None => {
            if problem.source_name.is_empty() {
                bail!("The problem has no short name and no archive name to fall back to");
            }
            warn!(
                "Missing short-name in {}, using {}",
                path.display(),
                problem.source_name
            );
            diagnostics.add_diagnostic(
                Diagnostic::warning(format!(
                    "The problem has no short name, using '{}'",
                    problem.source_name
                ))
                .with_note("The short-name attribute of <problem> in problem.xml is missing")
                .with_help("The short name is taken from the name of the archive"),
            );
            problem.source_name.clone()
        }
    };
    // the short name becomes a file name
    if problem.short_name.contains(['/', '\\']) || matches!(problem.short_name.as_str(), "." | "..")
    {
        bail!("Invalid short name {:?}", problem.short_name);
    }
    problem.full_name = match metadata.full_name {
        Some(full_name) => full_name,
        None => {
            diagnostics.add_diagnostic(Diagnostic::warning(format!(
                "Problem {} has no name, the name in config.ini will be empty",
                problem.short_name
            )));
            String::new()
        }
    };
    problem.maintainers = config.maintainers.clone();
    problem.time_limit_millis = metadata.time_limit_millis;
    problem.memory_limit_bytes = metadata.memory_limit_bytes;
    debug!(
        "Problem {} ({:?}): {}ms, {} bytes",
        problem.short_name,
        problem.full_name,
        problem.time_limit_millis,
        problem.memory_limit_bytes
    );
    Ok(())
}

fn read_checker(problem: &mut Problem) -> Result<(), Error> {
    let checker = problem.materials_folder.join(CHECKER);
    if !checker.is_file() {
        bail!("The checker is missing: {}", checker.display());
    }
    problem.checker = checker;
    Ok(())
}

fn read_statement(
    problem: &mut Problem,
    source_archive: &Path,
    config: &ConversionConfig,
    diagnostics: &mut DiagnosticContext,
) {
    let bundled = problem
        .materials_folder
        .join("statements")
        .join(".pdf")
        .join(&config.statement_language)
        .join("problem.pdf");
    let sibling = config
        .statement_from_sibling
        .then(|| sibling_statement(source_archive))
        .flatten();

    problem.statement = match sibling {
        Some(sibling) if sibling.is_file() => Some(sibling),
        _ if bundled.is_file() => Some(bundled.clone()),
        _ => None,
    };
    match &problem.statement {
        Some(statement) => debug!("Statement of {}: {}", problem.short_name, statement.display()),
        None => {
            warn!("Problem {} has no statement!", problem.short_name);
            diagnostics.add_diagnostic(
                Diagnostic::warning(format!("Problem {} has no statement", problem.short_name))
                    .with_note(format!("Looked for {}", bundled.display()))
                    .with_help(
                        "Put a PDF with the same name of the archive next to it to use it as \
                         the statement",
                    ),
            );
        }
    }
}

/// The PDF next to the archive, with the same name up to the first `.`.
fn sibling_statement(source_archive: &Path) -> Option<PathBuf> {
    let name = source_archive.file_name()?.to_string_lossy();
    let stem = name.split('.').next()?;
    Some(source_archive.with_file_name(format!("{}.pdf", stem)))
}

fn read_solutions(problem: &mut Problem, diagnostics: &mut DiagnosticContext) {
    let solutions_dir = problem.materials_folder.join(SOLUTIONS_DIR);
    if !solutions_dir.is_dir() {
        diagnostics.add_diagnostic(Diagnostic::warning(format!(
            "Problem {} has no {}/ directory, no solution will be included",
            problem.short_name, SOLUTIONS_DIR
        )));
        problem.solutions = vec![];
        return;
    }
    problem.solutions = list_files(&solutions_dir, vec!["*"])
        .into_iter()
        .filter(|p| !p.to_string_lossy().ends_with(SOLUTION_DESCRIPTION_SUFFIX))
        .collect();
    debug!(
        "Found {} solutions in {}",
        problem.solutions.len(),
        solutions_dir.display()
    );
}
