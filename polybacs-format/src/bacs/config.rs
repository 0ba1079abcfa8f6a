use std::fmt::{Display, Formatter};

use crate::Problem;

/// The content of the `config.ini` of a BACS package.
///
/// The textual form is fully determined by the fields, with a fixed order of the keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacsConfig {
    /// The title of the problem.
    pub name: String,
    /// The maintainers of the problem.
    pub maintainers: String,
    /// Time limit, in whole seconds.
    pub time_limit_seconds: u64,
    /// Memory limit, in whole mebibytes.
    pub memory_limit_mib: u64,
}

impl BacsConfig {
    /// Build the configuration of `problem`. The limits are truncated to whole units.
    pub fn from_problem(problem: &Problem) -> BacsConfig {
        BacsConfig {
            name: problem.full_name.clone(),
            maintainers: problem.maintainers.clone(),
            time_limit_seconds: problem.time_limit_seconds(),
            memory_limit_mib: problem.memory_limit_mib(),
        }
    }
}

impl Display for BacsConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[info]")?;
        writeln!(f, "name = {}", self.name)?;
        writeln!(f, "maintainers = {}", self.maintainers)?;
        writeln!(f)?;
        writeln!(f, "[resource_limits]")?;
        writeln!(f, "time = {}s", self.time_limit_seconds)?;
        writeln!(f, "memory = {}MiB", self.memory_limit_mib)
    }
}
