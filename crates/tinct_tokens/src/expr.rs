//! Single-value evaluation
//!
//! Reduces one [`TokenValue`] to a string against a table of already-resolved
//! tokens: literals pass through, `{path}` substrings are substituted, `$ref`
//! values are looked up, and `$compute` values are applied after their
//! arguments are resolved.

use std::sync::OnceLock;

use regex::Regex;

use crate::tokens::{
    is_declared, lookup_resolved, ResolvedTokens, TokenDefinition, TokenLiteral, TokenValue,
};
use crate::TokenError;

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("reference pattern is valid"))
}

/// Whether a string contains `{path}` reference syntax.
pub fn contains_reference(s: &str) -> bool {
    reference_pattern().is_match(s)
}

/// Whether a value can be copied to the output without evaluation.
pub fn is_plain_literal(value: &TokenValue) -> bool {
    match value {
        TokenValue::Literal(TokenLiteral::Num(_)) => true,
        TokenValue::Literal(TokenLiteral::Str(s)) => !contains_reference(s),
        _ => false,
    }
}

/// Where references are looked up.
///
/// `declared` is the merged definition being resolved; a path that is declared
/// there but absent from `resolved` is pending rather than missing.
#[derive(Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub resolved: &'a ResolvedTokens,
    pub declared: Option<&'a TokenDefinition>,
}

enum Lookup<'a> {
    Found(&'a str),
    Pending,
}

impl<'a> Scope<'a> {
    fn lookup(&self, path: &str) -> Result<Lookup<'a>, TokenError> {
        if let Some(value) = lookup_resolved(self.resolved, path) {
            return Ok(Lookup::Found(value));
        }
        match self.declared {
            Some(declared) if is_declared(declared, path) => Ok(Lookup::Pending),
            _ => Err(TokenError::ReferenceNotFound {
                path: path.trim().to_string(),
            }),
        }
    }

    /// Evaluate a value. `Ok(None)` means it depends on a token not resolved yet.
    pub(crate) fn evaluate(&self, value: &TokenValue) -> Result<Option<String>, TokenError> {
        match value {
            TokenValue::Literal(literal @ TokenLiteral::Num(_)) => Ok(Some(literal.to_token_string())),
            TokenValue::Literal(TokenLiteral::Str(s)) => self.substitute(s),
            TokenValue::Reference(reference) => match self.lookup(&reference.path)? {
                Lookup::Found(value) => Ok(Some(value.to_string())),
                Lookup::Pending => Ok(None),
            },
            TokenValue::Computed(computed) => {
                let mut args = Vec::with_capacity(computed.args.len());
                for arg in &computed.args {
                    let resolved = match arg {
                        TokenLiteral::Num(_) => Some(arg.to_token_string()),
                        TokenLiteral::Str(s) => self.substitute(s)?,
                    };
                    match resolved {
                        Some(resolved) => args.push(resolved),
                        None => return Ok(None),
                    }
                }
                computed.function.apply(&args).map(Some)
            }
        }
    }

    /// Replace every `{path}` in `s`. All of them must resolve.
    fn substitute(&self, s: &str) -> Result<Option<String>, TokenError> {
        if !contains_reference(s) {
            return Ok(Some(s.to_string()));
        }

        let mut out = String::with_capacity(s.len());
        let mut last = 0;
        for captures in reference_pattern().captures_iter(s) {
            let (Some(whole), Some(path)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            out.push_str(&s[last..whole.start()]);
            match self.lookup(path.as_str())? {
                Lookup::Found(value) => out.push_str(value),
                Lookup::Pending => return Ok(None),
            }
            last = whole.end();
        }
        out.push_str(&s[last..]);
        Ok(Some(out))
    }
}

/// Resolve a single value against fully resolved `context`.
///
/// Any reference that `context` cannot satisfy fails with
/// [`TokenError::ReferenceNotFound`].
pub fn resolve_value(value: &TokenValue, context: &ResolvedTokens) -> Result<String, TokenError> {
    let scope = Scope {
        resolved: context,
        declared: None,
    };
    // Without a declared table every lookup either succeeds or errors.
    scope
        .evaluate(value)
        .map(|resolved| resolved.unwrap_or_default())
}
