mod json;
mod terminal;

pub use json::{read_artifact, read_optional_artifact, write_artifact, ArtifactError};
pub use terminal::{format_size, TerminalReporter};
