use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Error};
use serde::{Deserialize, Serialize};

use polybacs_diagnostics::DiagnosticContext;
use polybacs_format::{bacs, list_files, polygon, ConversionConfig, Problem};

use crate::archive::{archive_stem, create_archive, extract_archive};

/// Directory, inside the working directory, where the source archives are extracted.
pub const UNZIPPED_DIR: &str = "unzipped";
/// Directory, inside the working directory, where the target packages are assembled.
pub const PREPARED_DIR: &str = "prepared";
/// Directory, inside the working directory, where the target archives are written by default.
pub const READY_DIR: &str = "ready";

/// Converts Polygon archives into BACS archives.
///
/// Every problem uses its own directories inside `unzipped/` and `prepared/`, so problems with
/// different names do not interfere with each other.
#[derive(Debug, Clone)]
pub struct Converter {
    /// The directory containing `unzipped/` and `prepared/`.
    pub work_dir: PathBuf,
    /// Where the output archives are written.
    pub output_dir: PathBuf,
    /// How to convert the problems.
    pub config: ConversionConfig,
}

/// The outcome of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// The archive that was converted.
    pub source_archive: PathBuf,
    /// The short name of the problem.
    pub short_name: String,
    /// The archive that was produced.
    pub output_archive: PathBuf,
    /// Number of tests of the problem.
    pub tests: usize,
    /// Number of solutions included in the output.
    pub solutions: usize,
    /// Whether the output contains the statement.
    pub statement: bool,
    /// The non fatal problems found during the conversion.
    pub diagnostics: DiagnosticContext,
}

impl Converter {
    /// Make a converter working inside `work_dir`, writing the archives in `work_dir/ready`.
    pub fn new<P: Into<PathBuf>>(work_dir: P, config: ConversionConfig) -> Converter {
        let work_dir = work_dir.into();
        Converter {
            output_dir: work_dir.join(READY_DIR),
            work_dir,
            config,
        }
    }

    /// Write the output archives in `output_dir` instead.
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Converter {
        self.output_dir = output_dir.into();
        self
    }

    /// Where the archive named `source_name` is extracted.
    pub fn unzipped_dir(&self, source_name: &str) -> PathBuf {
        self.work_dir.join(UNZIPPED_DIR).join(source_name)
    }

    /// Where the package of the problem named `short_name` is assembled.
    pub fn prepared_dir(&self, short_name: &str) -> PathBuf {
        self.work_dir.join(PREPARED_DIR).join(short_name)
    }

    /// The path of the output archive of the problem named `short_name`.
    pub fn output_archive(&self, short_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.zip", short_name))
    }

    /// Convert the Polygon archive at `archive` into a BACS archive.
    ///
    /// The working directories of the problem and its output archive are overwritten. On failure
    /// they are left as they are.
    pub fn convert<P: AsRef<Path>>(&self, archive: P) -> Result<ConversionReport, Error> {
        let archive = archive.as_ref();
        info!("Converting {}", archive.display());
        let mut diagnostics = DiagnosticContext::new();

        let mut problem = self
            .unpack(archive)
            .with_context(|| format!("Cannot unpack {}", archive.display()))?;
        polygon::read_problem(&mut problem, archive, &self.config, &mut diagnostics)
            .with_context(|| {
                format!(
                    "Cannot read the Polygon package of {}",
                    problem.source_name
                )
            })?;

        let prepared_dir = self.prepared_dir(&problem.short_name);
        bacs::assemble_problem(&mut problem, prepared_dir, &self.config).with_context(|| {
            format!("Cannot assemble the BACS package of {}", problem.short_name)
        })?;

        let output_archive = self.output_archive(&problem.short_name);
        let prefix = self.config.entry_prefix_for(&problem.short_name);
        create_archive(
            &problem.preparation_folder,
            &output_archive,
            prefix.as_deref(),
        )
        .with_context(|| format!("Cannot pack {}", problem.short_name))?;
        info!(
            "Converted {} into {}",
            archive.display(),
            output_archive.display()
        );

        Ok(ConversionReport {
            source_archive: archive.to_path_buf(),
            short_name: problem.short_name,
            output_archive,
            tests: problem.tests.len(),
            solutions: if self.config.include_solutions {
                problem.solutions.len()
            } else {
                0
            },
            statement: problem.statement.is_some(),
            diagnostics,
        })
    }

    fn unpack(&self, archive: &Path) -> Result<Problem, Error> {
        let source_name = archive_stem(archive);
        if source_name.is_empty() {
            bail!(
                "Cannot name the problem of {}: the archive name starts with a dot",
                archive.display()
            );
        }
        let materials_folder = self.unzipped_dir(&source_name);
        debug!(
            "Extracting {} into {}",
            archive.display(),
            materials_folder.display()
        );
        extract_archive(archive, &materials_folder)?;
        Ok(Problem::new(source_name, materials_folder))
    }
}

/// The `.zip` files inside `dir`, sorted by name.
pub fn find_archives<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("Cannot list {}: not a directory", dir.display());
    }
    Ok(list_files(dir, vec!["*.zip"]))
}
