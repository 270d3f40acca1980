//! `guildperm` Common Library
//!
//! Discord permission bitmask codec and OAuth2 invite URL builder. Everything
//! here is pure computation over constant tables; the CLI crate owns all I/O.

pub mod error;
pub mod invite;
pub mod permissions;

pub use error::{Error, InviteError, Result, TableError};
pub use invite::{build_invite_url, InviteBuilder};
pub use permissions::Permissions;
