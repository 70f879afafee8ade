use std::{error::Error, fmt, io, path::PathBuf};

/// Every failure is fatal to a generation run; callers surface it and stop.
#[derive(Debug)]
pub enum UmbrellaError {
    InvalidLibraryName(String),
    InvalidExtension(String),
    SourceDirectory { path: PathBuf, source: io::Error },
    NotADirectory(PathBuf),
    TargetDirectory { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Template(String),
    Config { path: PathBuf, reason: String },
}

impl fmt::Display for UmbrellaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UmbrellaError::InvalidLibraryName(name) => {
                write!(f, "Invalid library name '{}'", name)
            }
            UmbrellaError::InvalidExtension(ext) => {
                write!(f, "Invalid header extension '{}'", ext)
            }
            UmbrellaError::SourceDirectory { path, source } => {
                write!(
                    f,
                    "Failed to read source directory '{}': {}",
                    path.display(),
                    source
                )
            }
            UmbrellaError::NotADirectory(path) => {
                write!(f, "Source path '{}' is not a directory", path.display())
            }
            UmbrellaError::TargetDirectory { path, source } => {
                write!(
                    f,
                    "Failed to create target directory '{}': {}",
                    path.display(),
                    source
                )
            }
            UmbrellaError::Write { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            UmbrellaError::Template(msg) => write!(f, "Template error: {}", msg),
            UmbrellaError::Config { path, reason } => {
                write!(f, "Invalid config '{}': {}", path.display(), reason)
            }
        }
    }
}

impl Error for UmbrellaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UmbrellaError::SourceDirectory { source, .. }
            | UmbrellaError::TargetDirectory { source, .. }
            | UmbrellaError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<walkdir::Error> for UmbrellaError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
        UmbrellaError::SourceDirectory { path, source }
    }
}

pub type Result<T> = std::result::Result<T, UmbrellaError>;
