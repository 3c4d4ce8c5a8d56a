use corral_spec::{CommandSpec, SubcommandSpec};

use crate::error::MatchError;
use crate::matches::{MatchResult, SubcommandMatch};

/// Match `tokens` against `spec`, consulting the process environment for
/// env-fallback resolution.
pub fn match_tokens(spec: &CommandSpec, tokens: &[String]) -> Result<MatchResult, MatchError> {
    let env: Vec<(String, String)> = std::env::vars().collect();
    match_tokens_with_env(spec, tokens, &env)
}

/// Match `tokens` against `spec` with an explicit environment snapshot.
///
/// This is the pure core: a single left-to-right pass with no backtracking.
/// Environment and default fallbacks are applied only after the entire
/// stream is consumed, and only when no subcommand path was taken.
pub fn match_tokens_with_env(
    spec: &CommandSpec,
    tokens: &[String],
    env: &[(String, String)],
) -> Result<MatchResult, MatchError> {
    let mut result = MatchResult::default();
    let mut slot = 0usize;

    let mut i = 0usize;
    while i < tokens.len() {
        let token = tokens[i].as_str();

        if !token.starts_with('-') {
            if let Some((name, sub)) = spec.resolve_subcommand(token) {
                tracing::debug!(subcommand = name, "delegating remaining tokens");
                let rest = &tokens[i + 1..];
                let nested = match sub {
                    SubcommandSpec::Command(command) => {
                        SubcommandMatch::Matched(match_tokens_with_env(command, rest, env)?)
                    }
                    SubcommandSpec::Handler(_) => SubcommandMatch::Deferred(rest.to_vec()),
                };
                result.set_subcommand(name.to_string(), nested);
                // Requirements still pending at this level are not checked;
                // only the nested level validates its own.
                return Ok(result);
            }
        }

        if let Some(body) = token.strip_prefix("--") {
            i = long_option(spec, tokens, i, body, &mut result)?;
        } else if token.starts_with('-') && token.len() > 1 {
            i = short_bundle(spec, tokens, i, &mut result)?;
        } else {
            positional(spec, token, &mut slot, &mut result)?;
        }
        i += 1;
    }

    resolve_missing(spec, env, &mut result)?;
    Ok(result)
}

/// Handle `--name` / `--name=value` at `tokens[i]`. Returns the index of
/// the last token consumed.
fn long_option(
    spec: &CommandSpec,
    tokens: &[String],
    i: usize,
    body: &str,
    result: &mut MatchResult,
) -> Result<usize, MatchError> {
    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    let Some(arg) = spec.arg_by_long(name) else {
        return Err(MatchError::UnknownOption {
            name: format!("--{name}"),
        });
    };

    let mut last = i;
    if arg.takes_value {
        let value = match inline {
            Some(value) => value.to_string(),
            None => {
                last += 1;
                tokens
                    .get(last)
                    .cloned()
                    .ok_or_else(|| MatchError::MissingValue {
                        name: format!("--{name}"),
                    })?
            }
        };
        result.record_value(&arg.name, arg.multiple, value);
    } else {
        if inline.is_some() {
            return Err(MatchError::UnexpectedArgument {
                token: tokens[i].clone(),
            });
        }
        result.record_flag(&arg.name);
    }
    result.bump(&arg.name);
    Ok(last)
}

/// Handle a short bundle (`-x`, `-xyz`, `-xVALUE`) at `tokens[i]`. Returns
/// the index of the last token consumed.
fn short_bundle(
    spec: &CommandSpec,
    tokens: &[String],
    i: usize,
    result: &mut MatchResult,
) -> Result<usize, MatchError> {
    let chars: Vec<char> = tokens[i].chars().skip(1).collect();

    let mut last = i;
    for (pos, &c) in chars.iter().enumerate() {
        let Some(arg) = spec.arg_by_short(c) else {
            return Err(MatchError::UnknownOption {
                name: format!("-{c}"),
            });
        };
        if arg.takes_value {
            let attached: String = chars[pos + 1..].iter().collect();
            let value = if attached.is_empty() {
                last += 1;
                tokens
                    .get(last)
                    .cloned()
                    .ok_or_else(|| MatchError::MissingValue {
                        name: format!("-{c}"),
                    })?
            } else {
                attached
            };
            result.record_value(&arg.name, arg.multiple, value);
            result.bump(&arg.name);
            // A valued short option ends its bundle.
            break;
        }
        result.record_flag(&arg.name);
        result.bump(&arg.name);
    }
    Ok(last)
}

/// Record `token` into the positional slot under the cursor.
fn positional(
    spec: &CommandSpec,
    token: &str,
    slot: &mut usize,
    result: &mut MatchResult,
) -> Result<(), MatchError> {
    let Some(arg) = spec.positional(*slot) else {
        return Err(MatchError::UnexpectedArgument {
            token: token.to_string(),
        });
    };
    if arg.multiple {
        // A multiple slot absorbs every later positional token.
        result.record_value(&arg.name, true, token.to_string());
    } else {
        result.record_value(&arg.name, false, token.to_string());
        *slot += 1;
    }
    result.bump(&arg.name);
    Ok(())
}

/// Post-scan validation: required arguments without a recorded value fall
/// back to their environment variable, then their static default.
fn resolve_missing(
    spec: &CommandSpec,
    env: &[(String, String)],
    result: &mut MatchResult,
) -> Result<(), MatchError> {
    for arg in spec.args() {
        if !arg.required || result.contains(&arg.name) {
            continue;
        }
        if let Some(var) = arg.env.as_deref() {
            if let Some(value) = env_lookup(env, var) {
                tracing::debug!(arg = %arg.name, var, "required argument resolved from environment");
                result.record_value(&arg.name, arg.multiple, value.to_string());
                continue;
            }
        }
        if let Some(default) = arg.default_value.as_deref() {
            tracing::debug!(arg = %arg.name, "required argument resolved from default");
            result.record_value(&arg.name, arg.multiple, default.to_string());
            continue;
        }
        return Err(MatchError::MissingRequiredArgument {
            name: arg.name.clone(),
        });
    }
    Ok(())
}

fn env_lookup<'e>(env: &'e [(String, String)], key: &str) -> Option<&'e str> {
    env.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}
