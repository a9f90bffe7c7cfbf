use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    // Storage key of the attached image, not a URL.
    pub image: Option<String>,
    pub completed: bool,
    pub is_private: bool,
    pub user_id: u64,
}

// Task fields before the store has assigned an id.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub image: Option<String>,
    pub is_private: bool,
    pub user_id: u64,
}
