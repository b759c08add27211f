use thiserror::Error;

use super::{DomainError, Stage};

/// Error returned by every production stage model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    /// A stage hit an invalid operation and stopped.
    ///
    /// No partial output is produced.
    #[error("{stage} stage failed{}", on_line(.line))]
    Domain {
        stage: Stage,
        /// Zero-based line index, when the stage solves several lines.
        line: Option<usize>,
        #[source]
        source: DomainError,
    },
}

impl StageError {
    /// Returns a closure that attaches `stage` and `line` to a [`DomainError`].
    pub(crate) fn on(stage: Stage, line: Option<usize>) -> impl Fn(DomainError) -> Self {
        move |source| Self::Domain {
            stage,
            line,
            source,
        }
    }
}

fn on_line(line: &Option<usize>) -> String {
    line.map(|line| format!(" on line {}", line + 1))
        .unwrap_or_default()
}
