//! Token values

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::compute::{format_number, ComputeFn};
use crate::TokenError;

/// Compute arguments; every built-in function takes at most three.
pub type ComputeArgs = SmallVec<[TokenLiteral; 3]>;

/// A plain string or number
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenLiteral {
    Str(String),
    Num(f64),
}

impl TokenLiteral {
    /// The literal as it appears in resolved output (numbers without a trailing `.0`).
    pub fn to_token_string(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Num(n) => format_number(*n),
        }
    }
}

impl Display for TokenLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_token_string())
    }
}

impl From<&str> for TokenLiteral {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for TokenLiteral {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for TokenLiteral {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<i32> for TokenLiteral {
    fn from(n: i32) -> Self {
        Self::Num(n as f64)
    }
}

/// `{ "$ref": "colors.primary" }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReference {
    #[serde(rename = "$ref")]
    pub path: String,
}

/// `{ "$compute": "scale", "args": ["{spacing.unit}", 2] }`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenComputed {
    #[serde(rename = "$compute")]
    pub function: ComputeFn,
    pub args: ComputeArgs,
}

/// A token value before resolution
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Literal(TokenLiteral),
    Reference(TokenReference),
    Computed(TokenComputed),
}

impl TokenValue {
    /// Build a reference to another token by dot-path.
    pub fn reference(path: impl Into<String>) -> Self {
        Self::Reference(TokenReference { path: path.into() })
    }

    /// Build a computed value.
    pub fn compute<I, A>(function: ComputeFn, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<TokenLiteral>,
    {
        Self::Computed(TokenComputed {
            function,
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    /// Build a computed value from a function name, as written in token files.
    pub fn compute_named<I, A>(name: &str, args: I) -> Result<Self, TokenError>
    where
        I: IntoIterator<Item = A>,
        A: Into<TokenLiteral>,
    {
        Ok(Self::compute(name.parse()?, args))
    }

    pub fn as_literal(&self) -> Option<&TokenLiteral> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::Literal(s.into())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        Self::Literal(s.into())
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        Self::Literal(n.into())
    }
}

impl From<i32> for TokenValue {
    fn from(n: i32) -> Self {
        Self::Literal(n.into())
    }
}

impl From<TokenLiteral> for TokenValue {
    fn from(literal: TokenLiteral) -> Self {
        Self::Literal(literal)
    }
}

impl From<TokenReference> for TokenValue {
    fn from(reference: TokenReference) -> Self {
        Self::Reference(reference)
    }
}

impl From<TokenComputed> for TokenValue {
    fn from(computed: TokenComputed) -> Self {
        Self::Computed(computed)
    }
}

/// Build a `$ref` value.
pub fn reference(path: impl Into<String>) -> TokenValue {
    TokenValue::reference(path)
}

/// Build a `$compute` value. See also the [`compute!`](crate::compute!) macro.
pub fn compute<I, A>(function: ComputeFn, args: I) -> TokenValue
where
    I: IntoIterator<Item = A>,
    A: Into<TokenLiteral>,
{
    TokenValue::compute(function, args)
}

/// Wire shape of a token value; compute names are checked when converting.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTokenValue {
    Literal(TokenLiteral),
    Reference {
        #[serde(rename = "$ref")]
        path: String,
    },
    Computed {
        #[serde(rename = "$compute")]
        function: String,
        #[serde(default)]
        args: ComputeArgs,
    },
}

impl TryFrom<RawTokenValue> for TokenValue {
    type Error = TokenError;

    fn try_from(raw: RawTokenValue) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawTokenValue::Literal(literal) => Self::Literal(literal),
            RawTokenValue::Reference { path } => Self::reference(path),
            RawTokenValue::Computed { function, args } => Self::Computed(TokenComputed {
                function: function.parse()?,
                args,
            }),
        })
    }
}

impl<'de> Deserialize<'de> for TokenValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTokenValue::deserialize(deserializer)?;
        TokenValue::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Build a `$compute` value with mixed literal arguments.
///
/// ```rust,ignore
/// let sm = compute!(Scale, "{spacing.unit}", 2);
/// ```
#[macro_export]
macro_rules! compute {
    ($function:ident $(, $arg:expr)* $(,)?) => {
        $crate::TokenValue::compute(
            $crate::ComputeFn::$function,
            [$($crate::TokenLiteral::from($arg)),*],
        )
    };
}
