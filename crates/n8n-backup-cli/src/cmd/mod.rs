pub(crate) mod backup;
pub(crate) mod delete;
pub(crate) mod info;
pub(crate) mod list;
pub(crate) mod prune;
pub(crate) mod restore;
