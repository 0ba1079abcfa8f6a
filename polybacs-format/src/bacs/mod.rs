//! Assembling of problem packages in the BACS format.
//!
//! The assembled package has a fixed layout:
//!
//! ```text
//! config.ini             name, maintainers and limits
//! format                 format marker (template)
//! checker/check.cpp      checker/config.ini (template)
//! statement/problem.pdf  statement/pdf.ini (template), both only with a statement
//! tests/01.in tests/01.out ...
//! misc/solution/         reference solutions, with their original names
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Error};

use crate::{ConversionConfig, Problem};

pub use config::BacsConfig;
pub use template::{STATEMENT_TEMPLATE_FILES, TEMPLATE_FILES};

mod config;
mod template;

/// Name of the generated configuration file.
pub const CONFIG_INI: &str = "config.ini";
/// Path of the checker inside the package.
pub const CHECKER: &str = "checker/check.cpp";
/// Path of the statement inside the package.
pub const STATEMENT: &str = "statement/problem.pdf";
/// Directory of the tests inside the package.
pub const TESTS_DIR: &str = "tests";
/// Directory of the solutions inside the package.
pub const SOLUTIONS_DIR: &str = "misc/solution";

/// Name of the input file of the test with the specified number.
pub fn test_input_name(number: u32) -> String {
    format!("{:02}.in", number)
}

/// Name of the output file of the test with the specified number.
pub fn test_output_name(number: u32) -> String {
    format!("{:02}.out", number)
}

/// Build the BACS package of `problem` inside `preparation_folder`, which is removed first if it
/// exists.
///
/// A failure leaves the partially built package on disk.
pub fn assemble_problem<P: Into<PathBuf>>(
    problem: &mut Problem,
    preparation_folder: P,
    config: &ConversionConfig,
) -> Result<(), Error> {
    let root = preparation_folder.into();
    if root.exists() {
        std::fs::remove_dir_all(&root)
            .with_context(|| format!("Cannot remove {}", root.display()))?;
    }
    problem.preparation_folder = root;
    let root = &problem.preparation_folder;

    for dir in ["checker", "statement", TESTS_DIR, SOLUTIONS_DIR] {
        let dir = root.join(dir);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create {}", dir.display()))?;
    }
    template::write_template(root, TEMPLATE_FILES)?;

    copy_file(&problem.checker, root.join(CHECKER)).context("Cannot copy the checker")?;
    match &problem.statement {
        Some(statement) => {
            copy_file(statement, root.join(STATEMENT)).context("Cannot copy the statement")?;
            template::write_template(root, STATEMENT_TEMPLATE_FILES)?;
        }
        // statement/ stays empty
        None => info!("Skipping the statement of {}: not found", problem.short_name),
    }

    let config_ini = root.join(CONFIG_INI);
    std::fs::write(&config_ini, BacsConfig::from_problem(problem).to_string())
        .with_context(|| format!("Cannot write {}", config_ini.display()))?;

    if config.include_solutions {
        for solution in &problem.solutions {
            let name = solution
                .file_name()
                .with_context(|| format!("Invalid solution path {}", solution.display()))?;
            copy_file(solution, root.join(SOLUTIONS_DIR).join(name))
                .context("Cannot copy a solution")?;
        }
    }

    let tests = root.join(TESTS_DIR);
    for test in &problem.tests {
        copy_file(&test.input, tests.join(test_input_name(test.number)))
            .with_context(|| format!("Cannot copy the input of test {}", test.number))?;
        copy_file(&test.output, tests.join(test_output_name(test.number)))
            .with_context(|| format!("Cannot copy the output of test {}", test.number))?;
    }

    debug!(
        "Assembled {} in {}: {} tests, {} solutions",
        problem.short_name,
        root.display(),
        problem.tests.len(),
        if config.include_solutions {
            problem.solutions.len()
        } else {
            0
        }
    );
    Ok(())
}

/// Copy a file overwriting the destination.
fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> Result<(), Error> {
    let (from, to) = (from.as_ref(), to.as_ref());
    trace!("Copying {} -> {}", from.display(), to.display());
    std::fs::copy(from, to)
        .with_context(|| format!("Cannot copy {} to {}", from.display(), to.display()))?;
    Ok(())
}
