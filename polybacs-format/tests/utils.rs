#![allow(dead_code)]

use std::path::{Path, PathBuf};

use polybacs_diagnostics::DiagnosticContext;
use polybacs_format::{polygon, ConversionConfig, Problem};

pub const PROBLEM_XML: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>
<problem revision="7" short-name="sum" url="https://polygon.codeforces.com/p/jury/sum">
    <names>
        <name language="english" value="Sum of Two"/>
        <name language="russian" value="Сумма двух"/>
    </names>
    <judging input-file="" output-file="">
        <testset name="pretests">
            <time-limit>500</time-limit>
            <memory-limit>67108864</memory-limit>
        </testset>
        <testset name="tests">
            <time-limit>1500</time-limit>
            <memory-limit>536870912</memory-limit>
        </testset>
    </judging>
</problem>
"#;

/// Write an extracted Polygon package inside `root`: 3 tests, 2 solutions and the bundled
/// statement.
pub fn new_polygon_package(root: &Path) {
    let files: &[(&str, &str)] = &[
        ("problem.xml", PROBLEM_XML),
        ("check.cpp", "// checker\n"),
        ("statements/.pdf/english/problem.pdf", "%PDF english"),
        ("statements/.pdf/russian/problem.pdf", "%PDF russian"),
        ("solutions/main.cpp", "// main\n"),
        ("solutions/main.cpp.desc", "Tag: MAIN\n"),
        ("solutions/wa.py", "# wrong\n"),
        ("solutions/wa.py.desc", "Tag: WRONG_ANSWER\n"),
        ("tests/01", "1 1\n"),
        ("tests/01.a", "2\n"),
        ("tests/02", "2 2\n"),
        ("tests/02.a", "4\n"),
        ("tests/03", "3 3\n"),
        ("tests/03.a", "6\n"),
    ];
    for (path, content) in files {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

/// Read the Polygon package extracted in `<tmpdir>/unzipped/sum`, as if it came from
/// `<tmpdir>/sum.zip`.
pub fn read_package(
    tmpdir: &Path,
    config: &ConversionConfig,
) -> (Problem, DiagnosticContext) {
    let materials = tmpdir.join("unzipped").join("sum");
    let mut problem = Problem::new("sum", &materials);
    let mut diagnostics = DiagnosticContext::new();
    polygon::read_problem(
        &mut problem,
        &tmpdir.join("sum.zip"),
        config,
        &mut diagnostics,
    )
    .unwrap();
    (problem, diagnostics)
}

pub fn materials(tmpdir: &Path) -> PathBuf {
    tmpdir.join("unzipped").join("sum")
}
