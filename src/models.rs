// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Records served by the fitness backend and the helpers that turn raw collection
//! responses into ordered record lists.
//!
//! Records are read leniently: every field has a default, so a record missing a field
//! still renders. The client never enforces a schema beyond what the views display.
//!
//! ## Core Models
//!
//! - [`User`]: a team member, editable through the users view
//! - [`Team`]: a team with its ordered member names
//! - [`Activity`]: one logged workout session
//! - [`LeaderboardEntry`]: a ranked user
//! - [`Workout`]: a suggested workout plan

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// REST collections exposed by the fitness backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Teams,
    Activities,
    Leaderboard,
    Workouts,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Users,
        Resource::Teams,
        Resource::Activities,
        Resource::Leaderboard,
        Resource::Workouts,
    ];

    /// Path segment under `/api/`
    pub fn path_segment(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Teams => "teams",
            Resource::Activities => "activities",
            Resource::Leaderboard => "leaderboard",
            Resource::Workouts => "workouts",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// A record type listed by one backend collection
pub trait Record: DeserializeOwned + Default + Send + Sync + 'static {
    const RESOURCE: Resource;
}

/// Accept string or numeric identifiers, keeping them as text
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Accept a missing or `null` string
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept integers, floats, numeric strings or `null` (as zero)
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?.round() as i64)
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

/// Accept a missing or `null` list
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub team: String,
    /// `member` or `team_lead`
    #[serde(deserialize_with = "lenient_string")]
    pub role: String,
    pub avatar: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl User {
    pub fn is_team_lead(&self) -> bool {
        self.role == ROLE_TEAM_LEAD
    }
}

impl Record for User {
    const RESOURCE: Resource = Resource::Users;
}

pub const ROLE_MEMBER: &str = "member";
pub const ROLE_TEAM_LEAD: &str = "team_lead";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub leader: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub total_points: i64,
    /// Member names, in server order
    #[serde(deserialize_with = "lenient_list")]
    pub members: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl Record for Team {
    const RESOURCE: Resource = Resource::Teams;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub user_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub user_email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub team: String,
    #[serde(deserialize_with = "lenient_string")]
    pub activity_type: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub duration_minutes: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub distance_km: f64,
    #[serde(deserialize_with = "lenient_i64")]
    pub calories_burned: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub points: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    pub notes: Option<String>,
}

impl Record for Activity {
    const RESOURCE: Resource = Resource::Activities;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    /// Server-assigned position; drives medals, not the list index
    #[serde(deserialize_with = "lenient_i64")]
    pub rank: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub user_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub team: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub total_points: i64,
}

impl Record for LeaderboardEntry {
    const RESOURCE: Resource = Resource::Leaderboard;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workout {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub difficulty: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub duration_minutes: i64,
    #[serde(deserialize_with = "lenient_list")]
    pub exercises: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub target_muscles: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub recommended_for: Vec<String>,
}

impl Workout {
    pub fn difficulty_level(&self) -> Difficulty {
        Difficulty::from_label(&self.difficulty)
    }
}

impl Record for Workout {
    const RESOURCE: Resource = Resource::Workouts;
}

/// Workout difficulty with a fallback for labels the dashboard does not know
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl Difficulty {
    pub fn from_label(label: &str) -> Self {
        match label {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            other => Difficulty::Other(other.to_string()),
        }
    }

    /// Badge style class for this difficulty
    pub fn badge_class(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "bg-success",
            Difficulty::Intermediate => "bg-warning text-dark",
            Difficulty::Advanced => "bg-danger",
            Difficulty::Other(_) => "bg-secondary",
        }
    }
}

/// Partial-update body for `PATCH /api/users/{id}/`
///
/// All five editable fields are always sent, changed or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub team: String,
    pub role: String,
    pub avatar: String,
}

impl UserUpdate {
    /// Seed an update from the record as currently displayed
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            team: user.team.clone(),
            role: user.role.clone(),
            avatar: user.avatar.clone().unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "email": self.email,
            "team": self.team,
            "role": self.role,
            "avatar": self.avatar,
        })
    }
}

/// Normalize a collection response into an ordered list of raw records
///
/// An envelope exposing a `results` array is unwrapped; a plain array is used as is.
/// Any other shape yields an empty list rather than an error.
pub fn normalize_collection(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("Collection response has no results array; treating it as empty");
                Vec::new()
            }
        },
        other => {
            if !other.is_null() {
                warn!("Collection response is not a list; treating it as empty");
            }
            Vec::new()
        }
    }
}

/// Decode raw records, keeping one entry per input item
///
/// An item that does not decode becomes a default record, so the rendered row count
/// always matches what the server returned.
pub fn decode_records<T: Record>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                warn!(
                    "Record {} of {} did not decode, showing it empty: {}",
                    index,
                    T::RESOURCE,
                    e
                );
                T::default()
            })
        })
        .collect()
}
