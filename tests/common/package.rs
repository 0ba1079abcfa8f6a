use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// A Polygon package to be written as a zip archive.
#[derive(Debug, Clone)]
pub struct PolygonPackage {
    files: BTreeMap<String, Vec<u8>>,
}

pub fn problem_xml(short_name: Option<&str>, time_limit: &str, memory_limit: &str) -> String {
    let short_name = short_name
        .map(|s| format!(r#" short-name="{}""#, s))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>
<problem revision="3"{short_name} url="https://polygon.codeforces.com/p/jury/aplusb">
    <names>
        <name language="english" value="A + B"/>
    </names>
    <judging cpu-name="Intel(R) Core(TM) i3-8100 CPU @ 3.60GHz" cpu-speed="3600" input-file="" output-file="">
        <testset name="tests">
            <time-limit>{time_limit}</time-limit>
            <memory-limit>{memory_limit}</memory-limit>
            <test-count>2</test-count>
            <input-path-pattern>tests/%02d</input-path-pattern>
            <answer-path-pattern>tests/%02d.a</answer-path-pattern>
        </testset>
    </judging>
</problem>
"#
    )
}

impl PolygonPackage {
    /// The A + B problem: 2 tests, a checker, a solution with its description, no statement.
    pub fn aplusb() -> PolygonPackage {
        PolygonPackage {
            files: BTreeMap::new(),
        }
        .with_file(
            "problem.xml",
            problem_xml(Some("aplusb"), "2000", "268435456"),
        )
        .with_file("check.cpp", "#include \"testlib.h\"\nint main() {}\n")
        .with_file("tests/1.in", "1 2\n")
        .with_file("tests/1.out", "3\n")
        .with_file("tests/2.in", "40 2\n")
        .with_file("tests/2.ans", "42\n")
        .with_file("solutions/main.cpp", "int main() { return 0; }\n")
        .with_file("solutions/main.cpp.desc", "File name: main.cpp\nTag: MAIN\n")
        .with_file("files/testlib.h", "// testlib\n")
    }

    pub fn with_file<S: Into<String>, C: Into<Vec<u8>>>(mut self, path: S, content: C) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn without_file<S: AsRef<str>>(mut self, path: S) -> Self {
        self.files.remove(path.as_ref());
        self
    }

    pub fn content(&self, path: &str) -> &[u8] {
        &self.files[path]
    }

    /// Write the package as a (compressed) zip archive.
    pub fn write<P: AsRef<Path>>(&self, dest: P) {
        let mut zip = ZipWriter::new(File::create(dest).unwrap());
        for (path, content) in &self.files {
            zip.start_file(path.as_str(), SimpleFileOptions::default())
                .unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }
}

/// All the entries of a zip archive, by name.
pub fn read_zip<P: AsRef<Path>>(path: P) -> BTreeMap<String, Vec<u8>> {
    let mut zip = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).unwrap();
        let mut content = vec![];
        entry.read_to_end(&mut content).unwrap();
        entries.insert(entry.name().to_string(), content);
    }
    entries
}
