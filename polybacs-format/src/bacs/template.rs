use std::path::Path;

use anyhow::{Context, Error};

/// The files copied verbatim in every BACS package, as pairs of path relative to the package
/// root and content.
pub const TEMPLATE_FILES: &[(&str, &[u8])] = &[
    (
        "checker/config.ini",
        include_bytes!("../../data/template/checker/config.ini"),
    ),
    ("format", include_bytes!("../../data/template/format")),
];

/// The files copied verbatim only in the packages with a statement.
pub const STATEMENT_TEMPLATE_FILES: &[(&str, &[u8])] = &[(
    "statement/pdf.ini",
    include_bytes!("../../data/template/statement/pdf.ini"),
)];

/// Write the `files` of a template inside the package rooted at `root`.
pub(crate) fn write_template<P: AsRef<Path>>(
    root: P,
    files: &[(&str, &[u8])],
) -> Result<(), Error> {
    let root = root.as_ref();
    for (path, content) in files {
        let dest = root.join(path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
        std::fs::write(&dest, content)
            .with_context(|| format!("Cannot write {}", dest.display()))?;
        trace!("Template file written to {}", dest.display());
    }
    Ok(())
}
