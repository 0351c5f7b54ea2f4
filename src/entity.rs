//! The member and team relations and their column vocabulary.

use rosterq_query::Row;
use serde::{Deserialize, Serialize};

/// Namespaced column names of the member relation.
pub mod member {
    /// The relation name.
    pub const RELATION: &str = "member";
    pub const ID: &str = "member.id";
    pub const USERNAME: &str = "member.username";
    pub const AGE: &str = "member.age";
    pub const TEAM_ID: &str = "member.team_id";
}

/// Namespaced column names of the team relation.
pub mod team {
    /// The relation name.
    pub const RELATION: &str = "team";
    pub const ID: &str = "team.id";
    pub const NAME: &str = "team.name";
}

/// A member row. The username is nullable; a member may have no team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub username: Option<String>,
    pub age: i64,
    pub team_id: Option<i64>,
}

impl Member {
    /// Create a member.
    pub fn new(id: i64, username: impl Into<String>, age: i64, team_id: Option<i64>) -> Self {
        Self {
            id,
            username: Some(username.into()),
            age,
            team_id,
        }
    }

    /// Create a member without a username.
    pub fn unnamed(id: i64, age: i64, team_id: Option<i64>) -> Self {
        Self {
            id,
            username: None,
            age,
            team_id,
        }
    }

    /// The row shape a data store engine holds for this member.
    pub fn into_row(self) -> Row {
        Row::new()
            .with("id", self.id)
            .with("username", self.username)
            .with("age", self.age)
            .with("team_id", self.team_id)
    }
}

/// A team row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

impl Team {
    /// Create a team.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The row shape a data store engine holds for this team.
    pub fn into_row(self) -> Row {
        Row::new().with("id", self.id).with("name", self.name)
    }
}
