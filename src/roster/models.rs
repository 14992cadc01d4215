use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the players table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    pub position: Option<String>,
    pub number: Option<String>, // Jersey numbers like "00" are not integers
}

impl PlayerProfile {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            position: None,
            number: None,
        }
    }

    pub fn with_position(mut self, position: &str) -> Self {
        self.position = Some(position.to_string());
        self
    }

    pub fn with_number(mut self, number: &str) -> Self {
        self.number = Some(number.to_string());
        self
    }
}
