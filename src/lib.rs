//! # polybacs
//!
//! Converter of problem packages from the Polygon format to the BACS format. This is both an
//! application and a library: the [`Converter`] does the same conversion of the `polybacs`
//! binary, one archive at a time.
//!
//! The conversion of an archive goes through four stages:
//!
//! 1. the archive is extracted inside `unzipped/<archive name>/`;
//! 2. the Polygon package is read ([`polybacs_format::polygon`]);
//! 3. the BACS package is assembled inside `prepared/<short name>/`
//!    ([`polybacs_format::bacs`]);
//! 4. the package is stored in `<short name>.zip`.

#[macro_use]
extern crate log;

pub mod archive;
mod batch;
pub mod converter;
pub mod error;
pub mod opt;

pub use batch::main_convert;
pub use converter::*;
pub use opt::*;
