pub mod extract;
pub mod jwt;
pub mod language;
pub mod pagination;
pub mod validate;

pub use extract::{AppPath, AppQuery};
pub use language::Language;
pub use pagination::{PageRequest, Paginated, PaginationMeta};
