use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectError {
    #[error("no definition for `{type_name}`")]
    NoDefinition { type_name: &'static str },

    #[error("no scope declared for qualifier `{0}`")]
    UnknownQualifier(String),

    #[error("scope `{0}` is closed")]
    ScopeClosed(String),

    #[error("parameter {index} is missing or not a `{type_name}`")]
    MissingParameter {
        index: usize,
        type_name: &'static str,
    },

    #[error("`{0}` depends on itself")]
    Cycle(&'static str),
}
