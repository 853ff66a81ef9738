//! Persistence Layer - 持久化

pub mod sqlite;
