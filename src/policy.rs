//! Task access policy.
//!
//! Ownership is the single source of truth for write authorization; the
//! `is_private` flag is an orthogonal read-only axis. A task can be
//! publicly visible yet remain mutable only by its owner. Every mutating
//! handler goes through [`authorize_mutation`] before touching the store,
//! so the ownership check lives in exactly one place.

use crate::error::ApiError;
use crate::models::task::Task;

/// A task is readable by its owner, or by anyone when it is public.
pub fn can_read(actor_id: u64, task: &Task) -> bool {
    actor_id == task.user_id || !task.is_private
}

/// Only the owner may update, complete, or delete a task. Visibility
/// never grants write access.
pub fn can_mutate(actor_id: u64, task: &Task) -> bool {
    actor_id == task.user_id
}

/// Fails with a Forbidden error when `actor_id` does not own `task`.
pub fn authorize_mutation(actor_id: u64, task: &Task) -> Result<(), ApiError> {
    if can_mutate(actor_id, task) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You do not own this task".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(owner: u64, is_private: bool) -> Task {
        Task {
            id: 1,
            title: "t".into(),
            description: "d".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            image: None,
            completed: false,
            is_private,
            user_id: owner,
        }
    }

    #[test]
    fn owner_can_always_read() {
        assert!(can_read(1, &task(1, false)));
        assert!(can_read(1, &task(1, true)));
    }

    #[test]
    fn public_tasks_are_readable_by_anyone() {
        assert!(can_read(2, &task(1, false)));
    }

    #[test]
    fn private_tasks_are_hidden_from_non_owners() {
        assert!(!can_read(2, &task(1, true)));
    }

    #[test]
    fn non_owner_can_never_mutate_regardless_of_visibility() {
        assert!(!can_mutate(2, &task(1, false)));
        assert!(!can_mutate(2, &task(1, true)));
        assert!(can_mutate(1, &task(1, true)));
    }

    #[test]
    fn authorize_mutation_rejects_non_owner() {
        let t = task(1, false);
        assert!(authorize_mutation(1, &t).is_ok());
        match authorize_mutation(2, &t) {
            Err(ApiError::Forbidden(_)) => {}
            other => panic!("expected Forbidden, got {:?}", other.map(|_| ())),
        }
    }
}
