//! Category management for labelling transactions.

mod categories_page;
mod create_category_endpoint;
mod delete_category_endpoint;
mod domain;
mod set;

pub use categories_page::{CategoriesPageState, get_categories_page};
pub use create_category_endpoint::{CreateCategoryState, create_category_endpoint};
pub use delete_category_endpoint::{DeleteCategoryState, delete_category_endpoint};
pub use domain::CategoryName;
pub use set::CategorySet;
