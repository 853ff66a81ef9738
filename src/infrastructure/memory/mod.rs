//! Memory Layer - In-Memory Persistence
//!
//! UserRepository 的内存实现，供测试及无数据库部署使用

mod user_repository;

pub use user_repository::InMemoryUserRepository;
