use thiserror::Error;

/// Parse-time errors.
///
/// The first error encountered aborts the matching pass; errors are never
/// accumulated. Errors from a nested subcommand level propagate to the top
/// unchanged. Option names are reported as written in the stream, dashes
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("unknown option: {name}")]
    UnknownOption { name: String },

    #[error("option {name} requires a value")]
    MissingValue { name: String },

    #[error("unexpected argument: {token}")]
    UnexpectedArgument { token: String },

    #[error("required argument missing: {name}")]
    MissingRequiredArgument { name: String },
}
