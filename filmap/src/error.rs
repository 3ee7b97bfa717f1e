use thiserror::Error;

/// Fatal errors, carried inside `eyre::Report`.
///
#[derive(Debug, Error)]
pub enum Status {
    #[error("No such file {0}")]
    FileNotFound(String),
    #[error("Output directory for {0} does not exist")]
    NoOutputDirectory(String),
    #[error("{0} is not a text file")]
    NotText(String),
    #[error("Can not read {0}: {1}")]
    CannotRead(String, #[source] std::io::Error),
    #[error("Can not write {0}: {1}")]
    CannotWrite(String, #[source] std::io::Error),
    #[error("Bad parameter: {0}")]
    BadParameter(String),
}

/// Why a single dataset line was skipped.
///
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LineError {
    #[error("not valid UTF-8")]
    NotUtf8,
    #[error("no year")]
    NoYear,
    #[error("{0} years")]
    SeveralYears(usize),
    #[error("no title")]
    NoTitle,
    #[error("no location")]
    NoLocation,
}
