/// 趋势视图
/// 趋势榜查询 + 流派表查询（查找表未填充时才启用）；三联海报轮播

use crate::cache::query::{
    loader, Loader, QueryData, QueryKey, QueryOptions, QueryStatus, QuerySubscription,
};
use crate::context::AppContext;
use crate::services::tmdb;
use crate::types::movie::Movie;

/// 三联海报轮播：前一张、当前、后一张，循环
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    cur: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, cur: 0 }
    }

    pub fn current(&self) -> usize {
        self.cur
    }

    /// (前, 当前, 后) 三联下标；空列表返回 None
    pub fn triple(&self) -> Option<(usize, usize, usize)> {
        if self.len == 0 {
            return None;
        }
        let prev = (self.cur + self.len - 1) % self.len;
        let next = (self.cur + 1) % self.len;
        Some((prev, self.cur, next))
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.cur = (self.cur + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.cur = (self.cur + self.len - 1) % self.len;
        }
    }
}

/// 趋势页装载的查询
pub struct TrendView {
    pub trending: QuerySubscription,
    pub genres: QuerySubscription,
}

impl TrendView {
    pub fn mount(ctx: &AppContext) -> Self {
        let trending = ctx.cache.fetch(
            QueryKey::Trending,
            trending_loader(ctx),
            QueryOptions::default(),
        );
        // 流派表只需要一份：已填充时挂起查询不发请求
        let genre_options = QueryOptions {
            enabled: !ctx.genres.is_set(),
            ..Default::default()
        };
        let genres = ctx
            .cache
            .fetch(QueryKey::Genres, genres_loader(ctx), genre_options);
        Self { trending, genres }
    }

    /// 流派查询完成后写入共享查找表（只会生效一次）
    pub fn sync_genre_store(&self, ctx: &AppContext) {
        let entry = self.genres.current();
        if entry.status == QueryStatus::Success {
            if let Some(QueryData::Genres(list)) = entry.data {
                ctx.genres.set(list);
            }
        }
    }

    /// 当前影片的流派名，查找表未就绪时为空
    pub fn genre_names(&self, ctx: &AppContext, movie: &Movie) -> Vec<String> {
        ctx.genres.names_for(&movie.genre_ids)
    }
}

fn trending_loader(ctx: &AppContext) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        async move { tmdb::get_trending(&client).await.map(QueryData::MovieList) }
    })
}

fn genres_loader(ctx: &AppContext) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        async move { tmdb::get_genres(&client).await.map(QueryData::Genres) }
    })
}
