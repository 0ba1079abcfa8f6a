use anyhow::{anyhow, bail, Context, Error};
use serde::Deserialize;

/// The data of `problem.xml` needed for the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemMetadata {
    /// The `short-name` attribute of the root element, if present and not empty.
    pub short_name: Option<String>,
    /// The value of the first `<name>`, if present.
    pub full_name: Option<String>,
    /// The time limit of the main testset, in milliseconds.
    pub time_limit_millis: u64,
    /// The memory limit of the main testset, in bytes.
    pub memory_limit_bytes: u64,
}

/// The root `<problem>` element.
#[derive(Debug, Deserialize)]
struct ProblemXml {
    #[serde(rename = "@short-name", default)]
    short_name: Option<String>,
    #[serde(default)]
    names: Option<NamesXml>,
    #[serde(default)]
    judging: Option<JudgingXml>,
}

#[derive(Debug, Deserialize)]
struct NamesXml {
    #[serde(default)]
    name: Vec<NameXml>,
}

#[derive(Debug, Deserialize)]
struct NameXml {
    #[serde(rename = "@value", default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JudgingXml {
    #[serde(default)]
    testset: Vec<TestsetXml>,
}

#[derive(Debug, Deserialize)]
struct TestsetXml {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "time-limit", default)]
    time_limit: Option<String>,
    #[serde(rename = "memory-limit", default)]
    memory_limit: Option<String>,
}

/// Parse the content of a Polygon `problem.xml`.
///
/// The limits are taken from the testset named `tests`, or from the first testset if none has
/// that name. Missing or non numeric limits are an error, a missing name or short name is not.
pub fn parse_problem_xml(content: &str) -> Result<ProblemMetadata, Error> {
    let xml: ProblemXml = quick_xml::de::from_str(content).context("Invalid problem.xml")?;

    let short_name = xml
        .short_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let full_name = xml
        .names
        .and_then(|names| names.name.into_iter().next())
        .and_then(|name| name.value);

    let judging = xml
        .judging
        .ok_or_else(|| anyhow!("problem.xml has no <judging> element"))?;
    let testset = pick_testset(judging.testset)?;
    let time_limit_millis = parse_limit(testset.time_limit, "time-limit")?;
    let memory_limit_bytes = parse_limit(testset.memory_limit, "memory-limit")?;

    Ok(ProblemMetadata {
        short_name,
        full_name,
        time_limit_millis,
        memory_limit_bytes,
    })
}

fn pick_testset(testsets: Vec<TestsetXml>) -> Result<TestsetXml, Error> {
    let index = testsets
        .iter()
        .position(|t| t.name.as_deref() == Some("tests"))
        .unwrap_or(0);
    testsets
        .into_iter()
        .nth(index)
        .ok_or_else(|| anyhow!("problem.xml has no <testset> element"))
}

fn parse_limit(value: Option<String>, field: &str) -> Result<u64, Error> {
    let Some(value) = value else {
        bail!("problem.xml is missing <{}>", field);
    };
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid <{}> in problem.xml: {:?}", field, value))
}
