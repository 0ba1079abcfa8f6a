use std::path::PathBuf;

use clap::{ArgAction, Parser};

use polybacs_format::{ConversionConfig, DEFAULT_MAINTAINERS};

#[derive(Parser, Debug)]
#[clap(
    name = "polybacs",
    version,
    about = "Convert Polygon problem packages into BACS problem archives"
)]
pub struct Opt {
    /// The Polygon archives to convert.
    ///
    /// When none is specified, all the .zip files inside --input-dir are converted.
    pub archives: Vec<PathBuf>,

    /// Where to look for the archives when none is specified
    #[clap(short = 'i', long = "input-dir", default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory where the archives are extracted and the packages assembled
    #[clap(short = 'w', long = "work-dir", default_value = ".")]
    pub work_dir: PathBuf,

    /// Where to write the converted archives. Defaults to the ready/ folder of the work directory
    #[clap(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Stop at the first problem that cannot be converted
    #[clap(long = "fail-fast")]
    pub fail_fast: bool,

    /// Print a JSON report for each converted problem
    #[clap(long)]
    pub json: bool,

    #[clap(flatten, next_help_heading = Some("CONVERSION"))]
    pub conversion: ConversionOpt,

    #[clap(flatten, next_help_heading = Some("LOGGING"))]
    pub logger: LoggerOpt,
}

#[derive(Parser, Debug, Clone)]
pub struct ConversionOpt {
    /// Put the files of the archive inside the <PREFIX>-<short name>/ directory
    #[clap(short = 'p', long = "prefix")]
    pub prefix: Option<String>,

    /// Do not include the reference solutions
    #[clap(long = "no-solutions")]
    pub no_solutions: bool,

    /// Do not use the PDF next to the archive as statement
    #[clap(long = "no-sibling-statement")]
    pub no_sibling_statement: bool,

    /// Language of the statement bundled in the Polygon package
    #[clap(long = "statement-language", default_value = "english")]
    pub statement_language: String,

    /// The maintainers written in config.ini
    #[clap(long = "maintainers", default_value = DEFAULT_MAINTAINERS)]
    pub maintainers: String,

    /// Suffix marking the expected output of a test (e.g. .a). Can be repeated.
    ///
    /// When specified, replaces the default list (.a, .ans, .out).
    #[clap(long = "output-marker")]
    pub output_markers: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LoggerOpt {
    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl ConversionOpt {
    /// The conversion configuration selected by the options.
    pub fn config(&self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            include_solutions: !self.no_solutions,
            entry_prefix: self.prefix.clone(),
            statement_from_sibling: !self.no_sibling_statement,
            statement_language: self.statement_language.clone(),
            maintainers: self.maintainers.clone(),
            output_markers: if self.output_markers.is_empty() {
                default.output_markers
            } else {
                self.output_markers.clone()
            },
        }
    }
}

impl LoggerOpt {
    /// Setup the global logger based on the verbosity level. Without `-v` the `RUST_LOG`
    /// environment variable is used.
    pub fn enable_log(&self) {
        let mut builder = env_logger::Builder::from_default_env();
        match self.verbose {
            0 => {}
            1 => {
                builder.filter_level(log::LevelFilter::Info);
            }
            2 => {
                builder.filter_level(log::LevelFilter::Debug);
            }
            _ => {
                builder.filter_level(log::LevelFilter::Trace);
            }
        }
        builder.format_timestamp_nanos().init();
        better_panic::install();
    }
}
