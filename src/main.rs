use clap::Parser;

use polybacs::error::NiceError;
use polybacs::{main_convert, Opt};

fn main() {
    let opt = Opt::parse();
    opt.logger.enable_log();

    main_convert(opt).nice_unwrap()
}
