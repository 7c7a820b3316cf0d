pub mod capture;
pub mod delete;
pub mod info;
pub mod list;
pub mod prune;
pub mod restore;
