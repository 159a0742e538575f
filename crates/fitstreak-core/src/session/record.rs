use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workout difficulty rating carried on every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!(
                "unknown difficulty '{other}' (expected beginner, intermediate or advanced)"
            )),
        }
    }
}

/// One persisted completed session.
///
/// Records are append-only: the store generates the identifier and no
/// existing record is ever mutated. `completed_at` is always UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub title: String,
    pub difficulty: Difficulty,
    pub duration_min: u64,
    pub completed_at: DateTime<Utc>,
    /// Consecutive calendar days with at least one completion, >= 1.
    pub streak: u32,
}

/// Store-generated identifier of an appended record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Beginner".parse::<Difficulty>(), Ok(Difficulty::Beginner));
        assert_eq!(
            "ADVANCED".parse::<Difficulty>(),
            Ok(Difficulty::Advanced)
        );
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn record_serializes_with_lowercase_difficulty() {
        let record = SessionRecord {
            title: "Push-Ups".into(),
            difficulty: Difficulty::Intermediate,
            duration_min: 10,
            completed_at: Utc::now(),
            streak: 2,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["difficulty"], "intermediate");
        assert_eq!(json["streak"], 2);
    }
}
