//! Persistent storage for the content database

pub mod database;

pub use database::ContentDb;
