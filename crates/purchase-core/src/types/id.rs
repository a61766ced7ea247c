//! Identifier types.
//!
//! Documents owned by this service are keyed by newtype wrappers around
//! [`uuid::Uuid`]. Users and authors live in another service, so their ids
//! are carried as an opaque [`UserId`] whose accepted shape is chosen per
//! deployment by [`UserIdFormat`]. When the `sqlx` feature is enabled, each
//! key type also implements `sqlx::Type`, `sqlx::Encode`, and
//! `sqlx::Decode` for PostgreSQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::UserIdFormat;
use crate::error::AppError;

/// Macro to define a newtype document key around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new time-ordered identifier.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        #[cfg(feature = "sqlx")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a purchase.
    PurchaseId
);

define_id!(
    /// Unique identifier for a comment.
    CommentId
);

define_id!(
    /// Unique identifier for a file.
    FileId
);

/// Whether `raw` passes the store's native key format check.
pub fn is_native_id(raw: &str) -> bool {
    Uuid::parse_str(raw).is_ok()
}

/// Identity of a user owned by the external user directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse a wire id, enforcing the deployment's format.
    pub fn parse(raw: &str, format: UserIdFormat) -> Result<Self, AppError> {
        let valid = match format {
            UserIdFormat::Uuid => Uuid::parse_str(raw).is_ok(),
            UserIdFormat::Numeric => raw.parse::<u64>().is_ok_and(|n| n > 0),
            UserIdFormat::Opaque => !raw.trim().is_empty(),
        };
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::conversion(format!("malformed user id '{raw}'")))
        }
    }

    /// Wrap a value read back from the store.
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    /// Borrow the wire form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the wire form.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_id_new() {
        let id1 = PurchaseId::new();
        let id2 = PurchaseId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_file_id_from_str() {
        let uuid = Uuid::new_v4();
        let id: FileId = uuid.to_string().parse().expect("should parse");
        assert_eq!(id.into_uuid(), uuid);
        assert!("5fa5a7e0c3b1".parse::<FileId>().is_err());
    }

    #[test]
    fn test_native_id_check() {
        assert!(is_native_id(&Uuid::new_v4().to_string()));
        assert!(!is_native_id("not-an-id"));
        assert!(!is_native_id(""));
    }

    #[test]
    fn test_user_id_uuid_format() {
        let raw = Uuid::new_v4().to_string();
        assert_eq!(UserId::parse(&raw, UserIdFormat::Uuid).unwrap().as_str(), raw);
        assert!(UserId::parse("42", UserIdFormat::Uuid).is_err());
    }

    #[test]
    fn test_user_id_numeric_format() {
        assert!(UserId::parse("42", UserIdFormat::Numeric).is_ok());
        assert!(UserId::parse("0", UserIdFormat::Numeric).is_err());
        assert!(UserId::parse("abc", UserIdFormat::Numeric).is_err());
    }

    #[test]
    fn test_user_id_opaque_format() {
        assert!(UserId::parse("user-7", UserIdFormat::Opaque).is_ok());
        let err = UserId::parse("  ", UserIdFormat::Opaque).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Conversion);
    }

    #[test]
    fn test_user_id_serializes_as_string() {
        let id = UserId::from_stored("42".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
