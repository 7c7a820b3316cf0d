mod app_ops;
mod helpers;
mod list;
mod restore;
