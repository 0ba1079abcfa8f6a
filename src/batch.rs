use std::path::Path;

use anyhow::{bail, Error};
use itertools::Itertools;

use polybacs_diagnostics::{Diagnostic, DiagnosticContext};

use crate::converter::{find_archives, ConversionReport, Converter};
use crate::opt::Opt;

/// Entry point of the `polybacs` binary: convert all the selected archives.
///
/// Unless `--fail-fast` is used every archive is converted even if some fail, and the failures are
/// reported at the end.
pub fn main_convert(opt: Opt) -> Result<(), Error> {
    let archives = if opt.archives.is_empty() {
        find_archives(&opt.input_dir)?
    } else {
        opt.archives.clone()
    };
    if archives.is_empty() {
        bail!("No archive to convert in {}", opt.input_dir.display());
    }

    let mut converter = Converter::new(&opt.work_dir, opt.conversion.config());
    if let Some(output_dir) = &opt.output_dir {
        converter = converter.with_output_dir(output_dir);
    }

    let mut failures = DiagnosticContext::new();
    for archive in &archives {
        match converter.convert(archive) {
            Ok(report) => print_report(&report, opt.json)?,
            Err(e) if opt.fail_fast => return Err(e),
            Err(e) => {
                let failure = conversion_failure(archive, &e);
                eprint!("{}", failure);
                failures.add_diagnostic(failure);
            }
        }
    }

    if failures.has_errors() {
        bail!(
            "{} of {} archives could not be converted",
            failures.diagnostics().len(),
            archives.len()
        );
    }
    Ok(())
}

/// The diagnostic of a conversion that failed, with the causes of the error in the note.
fn conversion_failure(archive: &Path, error: &Error) -> Diagnostic {
    debug!("{:?}", error);
    let diagnostic = Diagnostic::error(format!("Cannot convert {}: {}", archive.display(), error));
    let causes = error.chain().skip(1).join("\n");
    if causes.is_empty() {
        diagnostic
    } else {
        diagnostic.with_note(causes)
    }
}

fn print_report(report: &ConversionReport, json: bool) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }
    println!(
        "{} -> {} ({} tests, {} solutions{})",
        report.source_archive.display(),
        report.output_archive.display(),
        report.tests,
        report.solutions,
        if report.statement { "" } else { ", no statement" }
    );
    for diagnostic in report.diagnostics.diagnostics() {
        eprint!("{}", diagnostic);
    }
    Ok(())
}
