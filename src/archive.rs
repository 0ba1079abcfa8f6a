//! Reading and writing of the zip archives of the packages.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Error};
use itertools::Itertools;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// The name of an archive up to the first `.`: `A123.zip` -> `A123`.
pub fn archive_stem<P: AsRef<Path>>(archive: P) -> String {
    archive
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(String::from))
        .unwrap_or_default()
}

/// Extract all the content of `archive` inside `dest`. If `dest` already exists it is removed
/// first.
///
/// Entries whose path would end up outside `dest` make the extraction fail.
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(archive: P, dest: Q) -> Result<(), Error> {
    let (archive, dest) = (archive.as_ref(), dest.as_ref());
    if dest.exists() {
        std::fs::remove_dir_all(dest)
            .with_context(|| format!("Cannot remove {}", dest.display()))?;
    }
    std::fs::create_dir_all(dest).with_context(|| format!("Cannot create {}", dest.display()))?;

    let file = File::open(archive).with_context(|| format!("Cannot open {}", archive.display()))?;
    let mut zip = ZipArchive::new(file)
        .with_context(|| format!("{} is not a valid zip archive", archive.display()))?;
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .with_context(|| format!("Corrupted entry {} in {}", index, archive.display()))?;
        let Some(relative) = entry.enclosed_name() else {
            bail!("Invalid entry path {:?} in {}", entry.name(), archive.display());
        };
        let path = dest.join(relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
        trace!("Extracting {} -> {}", entry.name(), path.display());
        let mut out =
            File::create(&path).with_context(|| format!("Cannot create {}", path.display()))?;
        std::io::copy(&mut entry, &mut out)
            .with_context(|| format!("Cannot extract {} from {}", entry.name(), archive.display()))?;
    }
    debug!("Extracted {} entries from {}", zip.len(), archive.display());
    Ok(())
}

/// Store every file inside `source_dir` into a new archive at `dest`, replacing it if it exists.
///
/// The entries are the paths relative to `source_dir`, with `/` as separator, optionally inside
/// the `prefix` directory. Directories are not stored. The entries are sorted by path, not
/// compressed and all have the same timestamp, so the same tree always gives the same archive.
pub fn create_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    source_dir: P,
    dest: Q,
    prefix: Option<&str>,
) -> Result<(), Error> {
    let (source_dir, dest) = (source_dir.as_ref(), dest.as_ref());
    if dest.exists() {
        std::fs::remove_file(dest).with_context(|| format!("Cannot remove {}", dest.display()))?;
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }

    let mut zip = ZipWriter::new(
        File::create(dest).with_context(|| format!("Cannot create {}", dest.display()))?,
    );
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default());
    let mut count = 0;
    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Cannot walk {}", source_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(source_dir)?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .join("/");
        let name = match prefix {
            Some(prefix) => format!("{}/{}", prefix, name),
            None => name,
        };
        trace!("Storing {} as {}", entry.path().display(), name);
        zip.start_file(name.as_str(), options)
            .with_context(|| format!("Cannot add {} to {}", name, dest.display()))?;
        let mut file = File::open(entry.path())
            .with_context(|| format!("Cannot open {}", entry.path().display()))?;
        std::io::copy(&mut file, &mut zip)
            .with_context(|| format!("Cannot add {} to {}", name, dest.display()))?;
        count += 1;
    }
    zip.finish()
        .with_context(|| format!("Cannot write {}", dest.display()))?;
    debug!("Stored {} files into {}", count, dest.display());
    Ok(())
}
