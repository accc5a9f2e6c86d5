//! Typed integer IDs for compile-time type safety.
//!
//! `Id<T>` wraps the store's positive `INTEGER PRIMARY KEY` values and carries
//! the entity it belongs to as a marker type, so a `UserId` can never be
//! passed where a `ResourceId` was expected.
//!
//! # Example
//!
//! ```rust
//! use directory_core::common::ResourceId;
//!
//! let id = ResourceId::parse("42").unwrap();
//! assert_eq!(id.get(), 42);
//! assert!(ResourceId::parse("0").is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

/// Why a raw value could not become an `Id`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("id must be an integer, got {0:?}")]
    NotAnInteger(String),

    #[error("id must be positive, got {0}")]
    NotPositive(i64),
}

/// A typed wrapper around a positive `i64` row id.
///
/// IDs with different `T` parameters are incompatible at compile time:
///
/// ```compile_fail
/// use directory_core::common::{ResourceId, UserId};
///
/// let user_id = UserId::new(1).unwrap();
/// let resource_id: ResourceId = user_id; // Compile error!
/// ```
#[repr(transparent)]
pub struct Id<T>(i64, PhantomData<fn() -> T>);

// ============================================================================
// Core implementations
// ============================================================================

impl<T> Id<T> {
    /// Creates an `Id` from a raw integer, rejecting zero and negatives.
    #[inline]
    pub fn new(raw: i64) -> Result<Self, IdError> {
        if raw < 1 {
            return Err(IdError::NotPositive(raw));
        }
        Ok(Self(raw, PhantomData))
    }

    /// Parses an `Id` from a path segment or form value.
    ///
    /// Surrounding whitespace is ignored; anything else that is not a
    /// base-10 integer is rejected, as is any value below 1.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| IdError::NotAnInteger(s.to_string()))?;
        Self::new(raw)
    }

    /// Wraps a value already read from the store.
    #[inline]
    pub(crate) fn from_row(raw: i64) -> Self {
        Self(raw, PhantomData)
    }

    /// Returns the inner integer.
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Include type name for debugging clarity
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> TryFrom<i64> for Id<T> {
    type Error = IdError;

    #[inline]
    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl<T> From<Id<T>> for i64 {
    #[inline]
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Serde support
// ============================================================================

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// sqlx support
// ============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Database, Decode, Encode, Type};

impl<T> Type<Sqlite> for Id<T> {
    fn type_info() -> SqliteTypeInfo {
        <i64 as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q, T> Encode<'q, Sqlite> for Id<T> {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<'q, Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

impl<'r, T> Decode<'r, Sqlite> for Id<T> {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        <i64 as Decode<'r, Sqlite>>::decode(value).map(Self::from_row)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct User;

    type UserId = Id<User>;

    #[test]
    fn test_parse_accepts_positive_integers() {
        assert_eq!(UserId::parse("7").unwrap().get(), 7);
        assert_eq!(UserId::parse(" 12 ").unwrap().get(), 12);
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        assert!(matches!(
            UserId::parse("abc"),
            Err(IdError::NotAnInteger(_))
        ));
        assert!(matches!(
            UserId::parse("1.5"),
            Err(IdError::NotAnInteger(_))
        ));
        assert!(matches!(UserId::parse(""), Err(IdError::NotAnInteger(_))));
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert_eq!(UserId::parse("0"), Err(IdError::NotPositive(0)));
        assert_eq!(UserId::parse("-3"), Err(IdError::NotPositive(-3)));
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        let parsed: Result<UserId, _> = serde_json::from_str("0");
        assert!(parsed.is_err());

        let parsed: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(parsed.get(), 5);
    }

    #[test]
    fn test_hash_map_key() {
        use std::collections::HashMap;
        let mut map: HashMap<UserId, &str> = HashMap::new();
        let id = UserId::new(3).unwrap();
        map.insert(id, "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }

    #[test]
    fn test_debug_includes_type_name() {
        let id = UserId::new(1).unwrap();
        let debug = format!("{:?}", id);
        assert!(debug.contains("User"));
    }
}
