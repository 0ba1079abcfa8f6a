use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Error;
use tempfile::TempDir;

use polybacs::{ConversionReport, Converter};
use polybacs_diagnostics::DiagnosticLevel;
use polybacs_format::ConversionConfig;

use super::{read_zip, setup, PolygonPackage};

/// Interface for testing the conversion of a package.
#[derive(Debug)]
pub struct TestInterface {
    result: Result<ConversionReport, Error>,
    tempdir: TempDir,
}

/// Interface for testing a successful conversion.
#[derive(Debug)]
pub struct TestInterfaceSuccessful {
    report: ConversionReport,
    entries: BTreeMap<String, Vec<u8>>,
    prefix: String,
    _tempdir: TempDir,
}

impl TestInterface {
    /// Write the package as `<work dir>/<archive_name>` and convert it.
    pub fn run<S: AsRef<str>>(
        package: &PolygonPackage,
        archive_name: S,
        config: ConversionConfig,
    ) -> Self {
        setup();
        let tempdir = TempDir::new().expect("Cannot create tempdir");
        let archive = tempdir.path().join(archive_name.as_ref());
        package.write(&archive);
        let converter = Converter::new(tempdir.path(), config);
        TestInterface {
            result: converter.convert(&archive),
            tempdir,
        }
    }

    /// Convert the package again, in the same working directory.
    pub fn rerun<S: AsRef<str>>(self, archive_name: S, config: ConversionConfig) -> Self {
        let archive = self.tempdir.path().join(archive_name.as_ref());
        let converter = Converter::new(self.tempdir.path(), config);
        TestInterface {
            result: converter.convert(&archive),
            tempdir: self.tempdir,
        }
    }

    pub fn work_dir(&self) -> &Path {
        self.tempdir.path()
    }

    /// Expect the conversion to fail with the specified message somewhere in the error chain.
    pub fn fail<S: AsRef<str>>(self, err: S) {
        let err = err.as_ref();
        match self.result {
            Err(e) => {
                if !format!("{:?}", e).contains(err) {
                    panic!(
                        "Expecting the conversion to fail with '{}' but failed with {:?}",
                        err, e
                    );
                }
            }
            Ok(report) => panic!(
                "Expecting the conversion to fail with '{}' but didn't fail: {:?}",
                err, report
            ),
        }
    }

    /// Expect the conversion not to fail, unlocking the checks on the produced archive.
    pub fn success(self) -> TestInterfaceSuccessful {
        self.success_with_prefix("")
    }

    /// Like `success`, but all the entries of the archive are expected inside `prefix`.
    pub fn success_with_prefix<S: Into<String>>(self, prefix: S) -> TestInterfaceSuccessful {
        match self.result {
            Ok(report) => {
                let entries = read_zip(&report.output_archive);
                TestInterfaceSuccessful {
                    report,
                    entries,
                    prefix: prefix.into(),
                    _tempdir: self.tempdir,
                }
            }
            Err(e) => panic!("Expecting the conversion not to fail, but failed with {:?}", e),
        }
    }
}

impl TestInterfaceSuccessful {
    pub fn report(&self) -> &ConversionReport {
        &self.report
    }

    pub fn output_archive(&self) -> PathBuf {
        self.report.output_archive.clone()
    }

    /// Check the name of the output archive.
    pub fn archive_name<S: AsRef<str>>(self, name: S) -> Self {
        let actual = self.report.output_archive.file_name().unwrap();
        assert_eq!(actual.to_string_lossy(), name.as_ref());
        self
    }

    /// Check the content of an entry of the archive.
    pub fn file<S: AsRef<str>, C: AsRef<[u8]>>(self, path: S, content: C) -> Self {
        let path = format!("{}{}", self.prefix, path.as_ref());
        match self.entries.get(&path) {
            Some(actual) => assert_eq!(
                String::from_utf8_lossy(actual),
                String::from_utf8_lossy(content.as_ref()),
                "Wrong content of {}",
                path
            ),
            None => panic!(
                "Missing {} in the archive, entries: {:?}",
                path,
                self.entries.keys()
            ),
        }
        self
    }

    /// Check that the archive contains an entry.
    pub fn has_file<S: AsRef<str>>(self, path: S) -> Self {
        let path = format!("{}{}", self.prefix, path.as_ref());
        assert!(
            self.entries.contains_key(&path),
            "Missing {} in the archive, entries: {:?}",
            path,
            self.entries.keys()
        );
        self
    }

    /// Check that the archive does not contain an entry.
    pub fn no_file<S: AsRef<str>>(self, path: S) -> Self {
        let path = format!("{}{}", self.prefix, path.as_ref());
        assert!(
            !self.entries.contains_key(&path),
            "Unexpected {} in the archive",
            path
        );
        self
    }

    /// Check the exact list of entries of the archive, without the prefix.
    pub fn entries(self, expected: &[&str]) -> Self {
        let expected: Vec<_> = expected
            .iter()
            .map(|e| format!("{}{}", self.prefix, e))
            .collect();
        let actual: Vec<_> = self.entries.keys().cloned().collect();
        assert_eq!(actual, expected);
        self
    }

    pub fn tests(self, count: usize) -> Self {
        assert_eq!(self.report.tests, count);
        self
    }

    pub fn statement(self, included: bool) -> Self {
        assert_eq!(self.report.statement, included);
        self
    }

    /// Check that a warning containing `message` has been emitted.
    pub fn warning<S: AsRef<str>>(self, message: S) -> Self {
        let found = self
            .report
            .diagnostics
            .diagnostics()
            .iter()
            .any(|d| d.level() == DiagnosticLevel::Warning && d.message().contains(message.as_ref()));
        assert!(
            found,
            "Missing warning '{}', diagnostics: {:?}",
            message.as_ref(),
            self.report.diagnostics
        );
        self
    }

    pub fn no_warnings(self) -> Self {
        assert!(
            self.report.diagnostics.is_empty(),
            "Unexpected diagnostics: {:?}",
            self.report.diagnostics
        );
        self
    }
}
