use diesel::prelude::*;
use jiff_diesel::Timestamp;
use serde::Deserialize;
use uuid::Uuid;

/// Service row.
///
/// Also derives `QueryableByName` so the hand-written listing query can load
/// it directly; column types come from the `services` table definition.
#[derive(Debug, Queryable, Selectable, QueryableByName, Clone)]
#[diesel(table_name = crate::schema::services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub title_en: String,
    pub sub_sub_category_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload; id and timestamps are filled in by the database.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService {
    pub title: String,
    pub title_en: String,
    pub sub_sub_category_id: Uuid,
}

/// Partial update of the bilingual title. `None` fields are left untouched.
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::services)]
pub struct UpdateService {
    pub title: Option<String>,
    pub title_en: Option<String>,
}

impl UpdateService {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.title_en.is_none()
    }
}
