pub mod memory;
pub mod models;
pub mod repo;
pub mod seed;
pub mod sqlite;
