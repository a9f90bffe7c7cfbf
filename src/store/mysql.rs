use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

use super::{TaskStore, TokenStore, UserStore};
use crate::models::task::{NewTask, Task};
use crate::models::token::AuthToken;
use crate::models::user::{NewUser, User};

pub struct MySqlTaskStore {
    pool: MySqlPool,
}

impl MySqlTaskStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for MySqlTaskStore {
    async fn insert(&self, new: NewTask) -> Result<Task> {
        let result = sqlx::query(
            "INSERT INTO tasks (title, description, due_date, image, completed, is_private, user_id)
             VALUES (?, ?, ?, ?, FALSE, ?, ?)",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.due_date)
        .bind(&new.image)
        .bind(new.is_private)
        .bind(new.user_id)
        .execute(&self.pool)
        .await
        .context("failed to insert task")?;

        Ok(Task {
            id: result.last_insert_id(),
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            image: new.image,
            completed: false,
            is_private: new.is_private,
            user_id: new.user_id,
        })
    }

    async fn get(&self, id: u64) -> Result<Option<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, due_date, image, completed, is_private, user_id
             FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch task")
    }

    async fn list(&self) -> Result<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, due_date, image, completed, is_private, user_id
             FROM tasks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list tasks")
    }

    async fn update(&self, task: &Task) -> Result<()> {
        sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, due_date = ?, image = ?, is_private = ?
             WHERE id = ?",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(&task.image)
        .bind(task.is_private)
        .bind(task.id)
        .execute(&self.pool)
        .await
        .context("failed to update task")?;
        Ok(())
    }

    async fn set_completed(&self, id: u64) -> Result<()> {
        sqlx::query("UPDATE tasks SET completed = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to mark task completed")?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete task")?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn insert(&self, new: NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.password_hash)
            .execute(&self.pool)
            .await
            .context("failed to insert user")?;

        Ok(User {
            id: result.last_insert_id(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch user by email")
    }
}

pub struct MySqlTokenStore {
    pool: MySqlPool,
}

impl MySqlTokenStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for MySqlTokenStore {
    async fn insert(&self, token: &str, user_id: u64) -> Result<()> {
        sqlx::query("INSERT INTO tokens (token, user_id) VALUES (?, ?)")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("failed to insert token")?;
        Ok(())
    }

    async fn lookup(&self, token: &str) -> Result<Option<u64>> {
        let row = sqlx::query_as::<_, AuthToken>(
            "SELECT token, user_id FROM tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .context("failed to look up token")?;
        Ok(row.map(|t| t.user_id))
    }

    async fn revoke(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tokens WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .context("failed to revoke token")?;
        Ok(result.rows_affected() > 0)
    }
}
