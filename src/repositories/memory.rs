//! In-memory repository implementations for use-case and handler tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

use super::{CategoryRepository, HealthRepository, ServiceRepository, TaskRepository};
use crate::error::{AppError, AppResult};
use crate::models::{NewService, Service, Task, UpdateService};
use crate::utils::PageRequest;

const BASE_SECOND: i64 = 1_700_000_000;

#[derive(Default)]
struct Tables {
    categories: Vec<Uuid>,
    /// (id, category_id)
    sub_categories: Vec<(Uuid, Uuid)>,
    /// (id, sub_category_id)
    sub_sub_categories: Vec<(Uuid, Uuid)>,
    services: Vec<Service>,
    tasks: Vec<Task>,
}

/// One shared store backing every repository trait.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    clock: AtomicI64,
    unreachable: AtomicBool,
}

/// Ids of a seeded category > sub-category > sub-sub-category chain.
#[derive(Debug, Clone, Copy)]
pub struct CategoryChain {
    pub category: Uuid,
    pub sub_category: Uuid,
    pub sub_sub_category: Uuid,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strictly increasing timestamps so newest-first ordering is deterministic.
    fn tick(&self) -> jiff_diesel::Timestamp {
        let offset = self.clock.fetch_add(1, Ordering::SeqCst);
        jiff::Timestamp::from_second(BASE_SECOND + offset)
            .unwrap()
            .to_diesel()
    }

    pub fn add_chain(&self) -> CategoryChain {
        let chain = CategoryChain {
            category: Uuid::new_v4(),
            sub_category: Uuid::new_v4(),
            sub_sub_category: Uuid::new_v4(),
        };
        let mut tables = self.tables.lock().unwrap();
        tables.categories.push(chain.category);
        tables
            .sub_categories
            .push((chain.sub_category, chain.category));
        tables
            .sub_sub_categories
            .push((chain.sub_sub_category, chain.sub_category));
        chain
    }

    /// Adds another sub-sub-category under an existing sub-category.
    pub fn add_sub_sub_category(&self, sub_category_id: Uuid) -> Uuid {
        let new_id = Uuid::new_v4();
        self.tables
            .lock()
            .unwrap()
            .sub_sub_categories
            .push((new_id, sub_category_id));
        new_id
    }

    pub fn add_service(&self, title: &str, title_en: &str, sub_sub_category_id: Uuid) -> Service {
        let now = self.tick();
        let service = Service {
            id: Uuid::new_v4(),
            title: title.to_string(),
            title_en: title_en.to_string(),
            sub_sub_category_id,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().services.push(service.clone());
        service
    }

    pub fn add_task(&self, user_id: Uuid) -> Task {
        let now = self.tick();
        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            title: "Trocar tomada".to_string(),
            sub_sub_category_id: None,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().tasks.push(task.clone());
        task
    }

    pub fn task(&self, task_id: Uuid) -> Option<Task> {
        self.tables
            .lock()
            .unwrap()
            .tasks
            .iter()
            .find(|task| task.id == task_id)
            .cloned()
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    fn page<F>(&self, matches: F, page: PageRequest) -> (Vec<Service>, i64)
    where
        F: Fn(&Tables, &Service) -> bool,
    {
        let tables = self.tables.lock().unwrap();
        let mut found: Vec<Service> = tables
            .services
            .iter()
            .filter(|service| matches(&*tables, service))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.to_jiff().cmp(&a.created_at.to_jiff()));

        let total = found.len() as i64;
        let rows = found
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        (rows, total)
    }
}

fn sub_category_of(tables: &Tables, sub_sub_category_id: Uuid) -> Option<Uuid> {
    tables
        .sub_sub_categories
        .iter()
        .find(|(id, _)| *id == sub_sub_category_id)
        .map(|(_, parent)| *parent)
}

fn category_of(tables: &Tables, sub_category_id: Uuid) -> Option<Uuid> {
    tables
        .sub_categories
        .iter()
        .find(|(id, _)| *id == sub_category_id)
        .map(|(_, parent)| *parent)
}

#[async_trait]
impl ServiceRepository for InMemoryStore {
    async fn find_many(
        &self,
        sub_sub_category_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)> {
        Ok(self.page(
            |_, service| sub_sub_category_id.is_none_or(|id| service.sub_sub_category_id == id),
            page,
        ))
    }

    async fn find_many_by_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)> {
        Ok(self.page(
            |tables, service| {
                sub_category_of(tables, service.sub_sub_category_id)
                    .and_then(|sub| category_of(tables, sub))
                    == Some(category_id)
            },
            page,
        ))
    }

    async fn find_many_by_sub_category(
        &self,
        sub_category_id: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Service>, i64)> {
        Ok(self.page(
            |tables, service| {
                sub_category_of(tables, service.sub_sub_category_id) == Some(sub_category_id)
            },
            page,
        ))
    }

    async fn find_by_id(&self, service_id: Uuid) -> AppResult<Option<Service>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.services.iter().find(|s| s.id == service_id).cloned())
    }

    async fn find_by_title(&self, service_title: &str) -> AppResult<Option<Service>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .services
            .iter()
            .find(|s| s.title == service_title)
            .cloned())
    }

    async fn create(&self, new_service: NewService) -> AppResult<Service> {
        if self.find_by_title(&new_service.title).await?.is_some() {
            return Err(AppError::Duplicate {
                entity: "services".to_string(),
                field: "title".to_string(),
                value: new_service.title,
            });
        }
        Ok(self.add_service(
            &new_service.title,
            &new_service.title_en,
            new_service.sub_sub_category_id,
        ))
    }

    async fn update(
        &self,
        service_id: Uuid,
        changes: UpdateService,
    ) -> AppResult<Option<Service>> {
        let now = self.tick();
        let mut tables = self.tables.lock().unwrap();
        let Some(service) = tables.services.iter_mut().find(|s| s.id == service_id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            service.title = title;
        }
        if let Some(title_en) = changes.title_en {
            service.title_en = title_en;
        }
        service.updated_at = now;
        Ok(Some(service.clone()))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn category_exists(&self, category_id: Uuid) -> AppResult<bool> {
        Ok(self.tables.lock().unwrap().categories.contains(&category_id))
    }

    async fn sub_category_exists(&self, sub_category_id: Uuid) -> AppResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(category_of(&tables, sub_category_id).is_some())
    }

    async fn sub_sub_category_exists(&self, sub_sub_category_id: Uuid) -> AppResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(sub_category_of(&tables, sub_sub_category_id).is_some())
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn find_by_id(&self, task_id: Uuid) -> AppResult<Option<Task>> {
        Ok(self.task(task_id))
    }

    async fn update_sub_sub_category(&self, task_id: Uuid, target: Uuid) -> AppResult<usize> {
        let now = self.tick();
        let mut tables = self.tables.lock().unwrap();
        match tables.tasks.iter_mut().find(|task| task.id == task_id) {
            Some(task) => {
                task.sub_sub_category_id = Some(target);
                task.updated_at = now;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl HealthRepository for InMemoryStore {
    async fn ping(&self) -> AppResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::ConnectionPool {
                source: anyhow::anyhow!("database unreachable"),
            });
        }
        Ok(())
    }
}
