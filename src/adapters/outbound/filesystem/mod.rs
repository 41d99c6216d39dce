/// Filesystem adapters for presenting results
mod file_writer;

pub use file_writer::{FilePresenter, StdoutPresenter};
