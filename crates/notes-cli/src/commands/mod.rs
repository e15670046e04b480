pub mod capture;
pub mod categories;
pub mod common;
pub mod delete;
pub mod edit;
pub mod list;
pub mod set_category;
pub mod show;

pub use capture::run_capture;
pub use categories::run_categories;
pub use common::connect;
pub use delete::run_delete;
pub use edit::run_edit;
pub use list::run_list;
pub use set_category::run_set_category;
pub use show::run_show;
