#![allow(dead_code)]

pub use package::*;
pub use test_interface::*;

mod package;
mod test_interface;

pub fn setup() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_nanos()
        .is_test(true)
        .try_init();
}
