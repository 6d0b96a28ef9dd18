/// tmdb-front 库入口
/// 电影发现应用的数据核心：网关、查询缓存、共享存储与视图状态同步

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod mappers;
pub mod services;
pub mod tmdb_client;
pub mod types;
pub mod view_state;
pub mod views;

pub use context::AppContext;
