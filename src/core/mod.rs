pub mod border;
pub mod catalog;
pub mod commission;
pub mod institution;
