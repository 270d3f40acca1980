//! Error types for the permission codec and invite builder.

use std::num::ParseIntError;

/// Errors surfaced by `gp-common` operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid permission integer '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("None of the given permission names are recognized: {}", names.join(", "))]
    NoRecognizedPermissions { names: Vec<String> },

    #[error("Unknown permission preset '{0}'")]
    UnknownPreset(String),

    #[error(transparent)]
    Invite(#[from] InviteError),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Invite URL construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InviteError {
    #[error("Client ID is required")]
    EmptyClientId,
}

/// Inconsistencies in a permission table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("Permission '{name}' has no bit set")]
    ZeroBit { name: &'static str },

    #[error("Permission '{name}' value {bits:#x} is not a single bit")]
    NotPowerOfTwo { name: &'static str, bits: u64 },

    #[error("Permissions '{first}' and '{second}' share bit {bits:#x}")]
    DuplicateBit {
        first: &'static str,
        second: &'static str,
        bits: u64,
    },

    #[error("Permission name '{name}' is defined more than once")]
    DuplicateName { name: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let source = "abc".parse::<u128>().unwrap_err();
        let err = Error::Parse {
            input: "abc".into(),
            source,
        };
        assert_eq!(
            err.to_string(),
            "Invalid permission integer 'abc': invalid digit found in string"
        );
    }

    #[test]
    fn test_no_recognized_permissions_lists_names() {
        let err = Error::NoRecognizedPermissions {
            names: vec!["bogus".into(), "nope".into()],
        };
        assert_eq!(
            err.to_string(),
            "None of the given permission names are recognized: bogus, nope"
        );
    }

    #[test]
    fn test_invite_error_is_transparent() {
        let err: Error = InviteError::EmptyClientId.into();
        assert_eq!(err.to_string(), "Client ID is required");
    }

    #[test]
    fn test_table_error_formats_bits_as_hex() {
        let err = TableError::DuplicateBit {
            first: "a",
            second: "b",
            bits: 2048,
        };
        assert_eq!(err.to_string(), "Permissions 'a' and 'b' share bit 0x800");
    }
}
