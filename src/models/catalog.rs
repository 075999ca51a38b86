use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

/// Top level of the service classification tree.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub name_en: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(Category))]
#[diesel(table_name = crate::schema::sub_category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
    pub name_en: String,
    pub category_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Most specific classification level; every service hangs off one of these.
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(SubCategory))]
#[diesel(table_name = crate::schema::sub_sub_category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubSubCategory {
    pub id: Uuid,
    pub name: String,
    pub name_en: String,
    pub sub_category_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
