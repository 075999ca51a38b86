//! Task use cases.

use std::sync::Arc;

use uuid::Uuid;

use crate::repositories::{CategoryRepository, TaskRepository};
use crate::services::error::{UseCaseError, UseCaseResult};
use crate::utils::Language;

fn not_owner_message(language: Language) -> &'static str {
    match language {
        Language::Pt => "Você não tem permissão para alterar esta tarefa.",
        Language::En => "You are not allowed to change this task.",
    }
}

/// Input of [`TaskService::update_sub_sub_category`].
///
/// Ids arrive as the client sent them; one that is not a UUID cannot name an
/// existing row and is reported as not found.
#[derive(Debug, Clone)]
pub struct UpdateTaskSubSubCategory {
    pub task_id: String,
    pub user_id: Uuid,
    pub sub_sub_category_id: String,
    pub language: Language,
}

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { tasks, categories }
    }

    /// Routes a task to a sub-sub-category on behalf of its owner.
    ///
    /// Checks run in order: the task exists, the caller owns it, the target
    /// exists. Nothing is written unless all three pass.
    pub async fn update_sub_sub_category(
        &self,
        input: UpdateTaskSubSubCategory,
    ) -> UseCaseResult<()> {
        let task = match Uuid::parse_str(&input.task_id) {
            Ok(task_id) => self.tasks.find_by_id(task_id).await?,
            Err(_) => None,
        }
        .ok_or_else(|| UseCaseError::not_found("task", "id", &input.task_id))?;

        if !task.is_owned_by(input.user_id) {
            return Err(UseCaseError::NotAllowed {
                message: not_owner_message(input.language).to_string(),
            });
        }

        let target = match Uuid::parse_str(&input.sub_sub_category_id) {
            Ok(id) => self
                .categories
                .sub_sub_category_exists(id)
                .await?
                .then_some(id),
            Err(_) => None,
        }
        .ok_or_else(|| {
            UseCaseError::not_found("sub_sub_category", "id", &input.sub_sub_category_id)
        })?;

        self.tasks.update_sub_sub_category(task.id, target).await?;

        tracing::info!(
            task_id = %task.id,
            sub_sub_category_id = %target,
            "Task routed to sub-sub-category"
        );
        Ok(())
    }
}
