use anyhow::Error;

/// Adds a method for failing without panic. Like `unwrap` but without panic.
pub trait NiceError<T> {
    /// Fail exiting with `1` if the value is an error. Otherwise return the content.
    fn nice_unwrap(self) -> T;
}

/// Print the error and all its causes to stderr.
pub fn print_error(error: &Error) {
    debug!("{:?}", error);
    eprintln!("Error: {error}");
    for cause in error.chain().skip(1) {
        eprintln!("\nCaused by:\n    {cause}");
    }
}

impl<T> NiceError<T> for Result<T, Error> {
    fn nice_unwrap(self) -> T {
        match self {
            Ok(x) => x,
            Err(e) => {
                print_error(&e);
                std::process::exit(1);
            }
        }
    }
}
