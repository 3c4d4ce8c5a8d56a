//! Token matching against corral command descriptors.
//!
//! [`match_tokens`] consumes an ordered token stream (program name already
//! stripped) against a [`corral_spec::CommandSpec`] in a single
//! left-to-right pass and produces a [`MatchResult`], or fails with the
//! first [`MatchError`] encountered. A token naming a registered subcommand
//! delegates the remaining stream to that subcommand recursively.
//!
//! Matching is synchronous and pure: the only inputs are the immutable
//! descriptor tree, the token slice, and an environment snapshot, so the
//! same invocation always produces the same result. Errors are returned to
//! the caller; printing and process exit are an application-level policy.
//!
//! [`help::render`] derives usage/options/subcommands text from the same
//! descriptor tree, independently of any matching pass.

mod error;
pub mod help;
mod matcher;
mod matches;

pub use error::MatchError;
pub use matcher::{match_tokens, match_tokens_with_env};
pub use matches::{ArgValue, MatchResult, SubcommandMatch};
