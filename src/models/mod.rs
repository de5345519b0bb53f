// src/models/mod.rs

pub mod user;
pub mod group;
pub mod task;
