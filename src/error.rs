use std::{io, path::PathBuf};

/// Errors raised while generating, checking, or renumbering instances
///
/// None of them is retried; callers are expected to abort the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The solver executable could not be started
    #[error("failed to launch solver `{program}`: {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Writing the formula to, or reading the verdict from, a running solver failed
    #[error("solver I/O failed: {0}")]
    SolverIo(#[source] io::Error),

    /// The verdict line was neither `SATISFIABLE` nor `UNSATISFIABLE`
    #[error("malformed solver output, verdict line: {line:?}")]
    MalformedSolverOutput { line: Option<String> },

    /// The growth phase hit the clause ceiling while still satisfiable
    #[error("formula still satisfiable at the ceiling of {max_clauses} clauses")]
    GenerationExhausted { max_clauses: usize },

    /// A DIMACS file could not be read back; `line` is 1-based
    #[error("DIMACS parse error at line {line}: {message}")]
    Dimacs { line: usize, message: String },

    /// Renaming a file failed; after the first move the directory is left partially renumbered
    #[error("failed to rename {} to {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Filesystem access outside of a solver run
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
