/// How strictly the document's schema-version marker is checked during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Accept both the flat legacy shape and any versioned shape.
    #[default]
    Lenient,
    /// Require a `version` marker whose text equals the given value.
    RequireVersion(String),
}

impl SchemaPolicy {
    pub fn lenient() -> Self {
        Self::Lenient
    }

    pub fn require_version(expected: impl Into<String>) -> Self {
        Self::RequireVersion(expected.into())
    }

    pub(crate) fn check(&self, found: Option<&str>) -> crate::Result<()> {
        let Self::RequireVersion(expected) = self else {
            return Ok(());
        };
        match found {
            None => Err(crate::Error::MissingVersion {
                expected: expected.clone(),
            }),
            Some(v) if v == expected => Ok(()),
            Some(v) => Err(crate::Error::UnsupportedVersion {
                expected: expected.clone(),
                found: v.to_string(),
            }),
        }
    }
}
