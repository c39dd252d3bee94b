pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid YAML: {message}")]
    Yaml { message: String },

    #[error("Invalid compose document: {message}")]
    InvalidDocument { message: String },

    #[error("Compose document has no `version` marker (expected {expected:?})")]
    MissingVersion { expected: String },

    #[error("Unsupported compose version {found:?} (expected {expected:?})")]
    UnsupportedVersion { expected: String, found: String },

    #[error("Incorrect yml format. Service `{component}` should be a mapping. Got {found}")]
    InvalidComponent { component: String, found: String },

    #[error(
        "Incorrect yml format. `{field}:` of service `{component}` should be {expected}. Got {found}"
    )]
    InvalidField {
        component: String,
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Incorrect yml format. `labels:` of service `{component}` should be a dict. Got {found}")]
    InvalidLabels { component: String, found: String },

    #[error("Malformed label {label:?} on service `{component}`: expected `key:value`")]
    MalformedLabel { component: String, label: String },
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml {
            message: value.to_string(),
        }
    }
}
