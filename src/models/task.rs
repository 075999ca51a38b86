use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

/// A customer task that can be routed to a sub-sub-category.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub sub_sub_category_id: Option<Uuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
