use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenError {
    #[error("token source not found: {id}")]
    SourceNotFound { id: String },

    #[error("token reference not found: {path}")]
    ReferenceNotFound { path: String },

    #[error("unknown compute function: {name}")]
    UnknownComputeFunction { name: String },

    #[error("circular inheritance detected for `{id}`: {}", chain.join(" -> "))]
    CircularInheritance { id: String, chain: Vec<String> },

    #[error("invalid argument to {function}: {message}")]
    InvalidArgument {
        function: &'static str,
        message: String,
    },

    #[error("unresolved tokens in `{source_id}`: {}", paths.join(", "))]
    Unresolved {
        source_id: String,
        paths: Vec<String>,
    },

    #[error("invalid engine config: {0}")]
    Config(String),
}
