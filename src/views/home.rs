/// 首页视图
/// 四个分类并发查询，各自独立的加载状态；主打影片依赖 popular 结果

use rand::Rng;

use crate::cache::query::{
    loader, Loader, QueryData, QueryEntry, QueryKey, QueryOptions, QueryStatus, QuerySubscription,
};
use crate::context::AppContext;
use crate::error::RemoteFetchError;
use crate::services::tmdb;
use crate::types::movie::Movie;

/// 单个分类区块的渲染状态
#[derive(Debug, Clone, PartialEq)]
pub enum SectionState {
    Loading,
    Ready(Vec<Movie>),
    /// 刷新失败但有旧数据时继续展示旧数据
    Failed {
        last: Option<Vec<Movie>>,
        error: RemoteFetchError,
    },
}

impl SectionState {
    /// 由缓存条目推导区块状态
    pub fn from_entry(entry: &QueryEntry) -> Self {
        let movies = entry
            .data
            .as_ref()
            .and_then(QueryData::as_movie_list)
            .map(<[Movie]>::to_vec);
        match (entry.status, movies, entry.error.clone()) {
            (QueryStatus::Success, Some(m), _) => SectionState::Ready(m),
            (QueryStatus::Error, last, Some(error)) => SectionState::Failed { last, error },
            _ => SectionState::Loading,
        }
    }
}

/// 首页装载的四个查询
pub struct HomeView {
    pub now_playing: QuerySubscription,
    pub popular: QuerySubscription,
    pub top_rated: QuerySubscription,
    pub upcoming: QuerySubscription,
    hero_idx: Option<usize>,
}

impl HomeView {
    /// 挂载首页：并发发起四个分类查询，完成顺序互不约束
    pub fn mount(ctx: &AppContext) -> Self {
        let options = QueryOptions::default();
        Self {
            now_playing: ctx
                .cache
                .fetch(QueryKey::NowPlaying, now_playing_loader(ctx), options),
            popular: ctx
                .cache
                .fetch(QueryKey::Popular, popular_loader(ctx), options),
            top_rated: ctx
                .cache
                .fetch(QueryKey::TopRated, top_rated_loader(ctx), options),
            upcoming: ctx
                .cache
                .fetch(QueryKey::Upcoming, upcoming_loader(ctx), options),
            hero_idx: None,
        }
    }

    /// 主打影片：popular 完成前不渲染；完成后随机选定一次并保持稳定
    pub fn hero(&mut self) -> Option<Movie> {
        let entry = self.popular.current();
        let list = entry.data.as_ref().and_then(QueryData::as_movie_list)?;
        if list.is_empty() {
            return None;
        }
        let idx = *self
            .hero_idx
            .get_or_insert_with(|| rand::thread_rng().gen_range(0..list.len()));
        list.get(idx).cloned()
    }

    /// 四个区块各自的渲染状态
    pub fn sections(&self) -> [(&'static str, SectionState); 4] {
        [
            (
                "Now Playing",
                SectionState::from_entry(&self.now_playing.current()),
            ),
            ("Popular", SectionState::from_entry(&self.popular.current())),
            (
                "Top Rated",
                SectionState::from_entry(&self.top_rated.current()),
            ),
            (
                "Upcoming",
                SectionState::from_entry(&self.upcoming.current()),
            ),
        ]
    }

    /// 等待四个查询全部进入终态（演示壳用；界面按区块独立渲染）
    pub async fn settle_all(&mut self) {
        self.now_playing.settled().await;
        self.popular.settled().await;
        self.top_rated.settled().await;
        self.upcoming.settled().await;
    }
}

fn now_playing_loader(ctx: &AppContext) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        async move {
            tmdb::get_now_playing(&client)
                .await
                .map(QueryData::MovieList)
        }
    })
}

fn popular_loader(ctx: &AppContext) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        async move { tmdb::get_popular(&client).await.map(QueryData::MovieList) }
    })
}

fn top_rated_loader(ctx: &AppContext) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        async move { tmdb::get_top_rated(&client).await.map(QueryData::MovieList) }
    })
}

fn upcoming_loader(ctx: &AppContext) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        async move { tmdb::get_upcoming(&client).await.map(QueryData::MovieList) }
    })
}
