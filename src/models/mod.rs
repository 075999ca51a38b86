mod catalog;
mod service;
mod task;

pub use catalog::{Category, SubCategory, SubSubCategory};
pub use service::{NewService, Service, UpdateService};
pub use task::Task;
