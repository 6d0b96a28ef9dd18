/// 详情覆盖层视图
/// 详情与演职员成对查询，按影片 id 独立建键，不同影片互不串扰

use crate::cache::query::{
    loader, Loader, QueryData, QueryEntry, QueryKey, QueryOptions, QuerySubscription,
};
use crate::context::AppContext;
use crate::error::{NotFoundError, RemoteFetchError};
use crate::services::tmdb;
use crate::types::movie::{Credit, CrewMember, Movie};
use crate::view_state::location::Router;

/// 详情覆盖层的渲染状态
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready { movie: Movie, credit: Credit },
    /// 影片不存在，降级渲染
    Missing(NotFoundError),
    Failed(RemoteFetchError),
}

/// 一个打开的详情覆盖层
pub struct DetailView {
    movie_id: u64,
    pub detail: QuerySubscription,
    pub credits: QuerySubscription,
}

impl DetailView {
    pub fn mount(ctx: &AppContext, movie_id: u64) -> Self {
        let detail = ctx.cache.fetch(
            QueryKey::Detail(movie_id),
            detail_loader(ctx, movie_id),
            QueryOptions::default(),
        );
        let credits = ctx.cache.fetch(
            QueryKey::Credits(movie_id),
            credits_loader(ctx, movie_id),
            QueryOptions::default(),
        );
        Self {
            movie_id,
            detail,
            credits,
        }
    }

    pub fn movie_id(&self) -> u64 {
        self.movie_id
    }

    /// 两个查询都完成才进入 Ready
    pub fn state(&self) -> DetailState {
        derive_state(self.movie_id, &self.detail.current(), &self.credits.current())
    }

    /// 导演：第一个 job 为 Director 的职员，兜底取第一位
    pub fn director(credit: &Credit) -> Option<&CrewMember> {
        credit
            .crew
            .iter()
            .find(|c| c.job == "Director")
            .or_else(|| credit.crew.first())
    }

    /// 演员名连成一行
    pub fn cast_line(credit: &Credit) -> String {
        credit
            .cast
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 关闭覆盖层 = 后退导航，与浏览器后退一致
    pub fn close(router: &mut Router) {
        router.back();
    }
}

fn derive_state(movie_id: u64, detail: &QueryEntry, credits: &QueryEntry) -> DetailState {
    let not_found = [detail.error.as_ref(), credits.error.as_ref()]
        .into_iter()
        .flatten()
        .any(RemoteFetchError::is_not_found);
    if not_found {
        return DetailState::Missing(NotFoundError { movie_id });
    }

    if let Some(err) = detail.error.clone().or_else(|| credits.error.clone()) {
        // 有旧数据时继续向下走，保持展示
        if detail.data.is_none() || credits.data.is_none() {
            return DetailState::Failed(err);
        }
    }

    match (detail.data.clone(), credits.data.clone()) {
        (Some(QueryData::MovieDetail(movie)), Some(QueryData::Credits(credit))) => {
            DetailState::Ready { movie, credit }
        }
        _ => DetailState::Loading,
    }
}

fn detail_loader(ctx: &AppContext, movie_id: u64) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        async move {
            tmdb::get_movie_detail(&client, movie_id)
                .await
                .map(QueryData::MovieDetail)
        }
    })
}

fn credits_loader(ctx: &AppContext, movie_id: u64) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        async move {
            tmdb::get_movie_credits(&client, movie_id)
                .await
                .map(QueryData::Credits)
        }
    })
}
