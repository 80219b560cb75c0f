use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn const_violation(target: impl Into<String>, origin: impl Into<String>) -> Error {
        Error(
            ErrorKind::ConstViolation {
                target: target.into(),
                origin: origin.into(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    /// A conversion would let an element reached through an immutable view be
    /// mutated through the converted one.
    #[error("cannot build a {target} base range from a {origin} base range")]
    ConstViolation { target: String, origin: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn test_error_kind_roundtrip() {
        let err = Error::invalid_arg("range", "start <= end");
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        assert_eq!(err.to_string(), "invalid argument range: start <= end");

        let err = Error::const_violation("borrows-mutable", "borrows-immutable");
        assert_eq!(
            err.to_string(),
            "cannot build a borrows-mutable base range from a borrows-immutable base range"
        );
        match err.into_kind() {
            ErrorKind::ConstViolation { target, origin } => {
                assert_eq!(target, "borrows-mutable");
                assert_eq!(origin, "borrows-immutable");
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }
}
