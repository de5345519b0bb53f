//! Task tracking backend: users, groups and tasks behind HTTP Basic
//! credentials and an admin/user role split.

pub mod auth;
pub mod config;
pub mod cors;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
