//! The joined member/team projection returned to callers.

use rosterq_query::{QueryResult, Row};
use serde::{Deserialize, Serialize};

use crate::entity::{member, team};

/// One row of the member-with-team search projection.
///
/// The team side is optional: under a left join a member without a team
/// still appears, with `team_id`/`team_name` absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i64,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl MemberTeamDto {
    /// The projection columns this DTO is built from, in order.
    pub fn projection() -> [&'static str; 5] {
        [
            member::ID,
            member::USERNAME,
            member::AGE,
            team::ID,
            team::NAME,
        ]
    }

    /// Materialize the DTO from a projected row.
    pub fn from_row(row: &Row) -> QueryResult<Self> {
        Ok(Self {
            member_id: row.get_i64(member::ID)?,
            username: row.get_opt_str(member::USERNAME)?.map(str::to_string),
            age: row.get_i64(member::AGE)?,
            team_id: row.get_opt_i64(team::ID)?,
            team_name: row.get_opt_str(team::NAME)?.map(str::to_string),
        })
    }
}
