//! Member domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
    /// Creates a new random MemberId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MemberId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered customer, uniquely identified by email.
///
/// Members are immutable once created. The member's orders are not held here;
/// they are fetched by querying orders on `member_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,
    /// Display name
    pub name: String,
    /// Email address, globally unique
    pub email: String,
    /// When the member registered
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new member.
    ///
    /// # Validation
    /// - Name cannot be empty
    /// - Email cannot be empty
    pub fn new(name: String, email: String, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Member name cannot be empty".into(),
            ));
        }
        if email.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Member email cannot be empty".into(),
            ));
        }

        Ok(Self {
            id: MemberId::new(),
            name,
            email,
            created_at: now,
        })
    }

    /// Creates a member with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: MemberId,
        name: String,
        email: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }
}
