use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::task::Task;
use crate::store::AssetStore;

// Create/update body. Everything is optional at the wire level so
// validation can report all missing fields at once instead of failing
// on deserialization. `image` carries base64-encoded bytes; an omitted
// `is_private` means "public" on create and "keep" on update.
#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub image: Option<String>,
    pub is_private: Option<bool>,
}

// The task view returned by every endpoint. `image` is an absolute URL,
// never a bare storage key.
#[derive(Debug, Serialize)]
pub struct TaskView {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub due_date: NaiveDate,
    pub completed: bool,
    pub user_id: u64,
}

impl TaskView {
    pub fn from_task(task: &Task, assets: &dyn AssetStore) -> Self {
        TaskView {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            image: task.image.as_deref().map(|key| assets.url(key)),
            due_date: task.due_date,
            completed: task.completed,
            user_id: task.user_id,
        }
    }
}

// GET /public/tasks response: the visible tasks plus the latest due
// date among them, which the client renders as a calendar header.
#[derive(Debug, Serialize)]
pub struct PublicTasksResponse {
    pub tasks: Vec<TaskView>,
    #[serde(rename = "latestDate")]
    pub latest_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
