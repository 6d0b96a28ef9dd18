/// 应用上下文
/// 缓存与共享存储的统一构造点，生命周期与会话一致
/// 组件之间不做任何隐式全局查找，测试可各自实例化

use std::sync::Arc;

use crate::cache::query::QueryCache;
use crate::config::AppConfig;
use crate::services::genre_store::GenreStore;
use crate::tmdb_client::client::{TmdbClient, TmdbClientOptions};
use crate::view_state::scroll::ScrollLock;

pub struct AppContext {
    pub config: AppConfig,
    pub client: Arc<TmdbClient>,
    pub cache: QueryCache,
    pub genres: GenreStore,
    pub scroll: ScrollLock,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let client = Arc::new(TmdbClient::new(&config, TmdbClientOptions::default()));
        Self {
            config,
            client,
            cache: QueryCache::new(),
            genres: GenreStore::new(),
            scroll: ScrollLock::new(),
        }
    }
}
