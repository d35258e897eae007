pub mod list;

pub use list::DataForm;
