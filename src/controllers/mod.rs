pub mod detail;
pub mod list;

pub use detail::DetailController;
pub use list::ListController;
