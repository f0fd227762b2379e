use std::path::PathBuf;

use snafu::Snafu;

/// # errors raised while reading or writing the record file
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StoreError {
    #[snafu(display("could not read record file {}: {}", path.display(), source))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("could not parse line {} of {}: {}", line, path.display(), source))]
    Parse {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[snafu(display("could not read the last handed out id from {}: {}", path.display(), source))]
    LastId {
        path: PathBuf,
        source: std::num::ParseIntError,
    },

    #[snafu(display("could not serialize competitor {}: {}", id, source))]
    Serialize {
        id: u64,
        source: serde_json::Error,
    },

    #[snafu(display("could not write record file {}: {}", path.display(), source))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// # errors raised by edit and delete
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum MutationError {
    #[snafu(display("no competitor with id {}", id))]
    NotFound { id: u64 },

    #[snafu(display("{}", source))]
    Store { source: StoreError },
}

impl From<StoreError> for MutationError {
    fn from(source: StoreError) -> Self {
        MutationError::Store { source }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), display("unknown category: {:?}", value))]
pub struct UnknownCategoryError {
    pub value: String,
}

/// # errors raised while reading a file in the old comma separated format
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LegacyError {
    #[snafu(display("could not read legacy file {}: {}", path.display(), source))]
    LegacyRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("line {}: {}", line, source))]
    LegacyLine {
        line: usize,
        source: UnknownCategoryError,
    },
}
