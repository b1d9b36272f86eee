use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad delimiter, empty column name, etc.).
    ConfigValidation(String),
    /// Missing required column in a source's header row.
    MissingColumn { source: String, column: String },
    /// CSV decoding error in a source file.
    Csv { source: String, message: String },
    /// Registry record too short to index every compared field position.
    MalformedRecord {
        device_id: String,
        segments: usize,
        required: usize,
    },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source}: missing column '{column}'")
            }
            Self::Csv { source, message } => write!(f, "{source}: CSV error: {message}"),
            Self::MalformedRecord {
                device_id,
                segments,
                required,
            } => write!(
                f,
                "malformed registry record '{device_id}': {segments} address segment(s), at least {required} required"
            ),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
