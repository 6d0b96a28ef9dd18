/// 搜索视图
/// 表单校验在边界完成；搜索词变化时移除旧键并为新键发起新请求

use tracing::debug;

use crate::cache::query::{loader, Loader, QueryData, QueryKey, QueryOptions, QuerySubscription};
use crate::context::AppContext;
use crate::error::ValidationError;
use crate::services::tmdb;
use crate::view_state::location::Router;
use crate::view_state::overlay::OverlayState;

/// 校验搜索输入：去除首尾空白后不得为空
pub fn validate_query(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: "query",
            message: "搜索词不能为空".into(),
        });
    }
    Ok(trimmed.to_string())
}

/// 搜索页，搜索词由位置驱动
#[derive(Default)]
pub struct SearchView {
    term: Option<String>,
    pub results: Option<QuerySubscription>,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// 表单提交：校验通过后导航到搜索路径，由位置变化驱动后续查询
    pub fn submit(router: &mut Router, raw: &str) -> Result<(), ValidationError> {
        let query = validate_query(raw)?;
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair("query", &query)
            .finish();
        router.push(&format!("/search?{}", encoded));
        Ok(())
    }

    /// 位置变化后同步搜索查询
    pub fn sync(&mut self, ctx: &AppContext, state: &OverlayState) {
        self.retarget(ctx, state.search_query.clone(), |term| {
            search_loader(ctx, term.to_string())
        });
    }

    /// 搜索词变化：移除旧词条目，避免新词页面闪现旧结果
    fn retarget(
        &mut self,
        ctx: &AppContext,
        next: Option<String>,
        make_loader: impl Fn(&str) -> Loader,
    ) {
        if next == self.term {
            return;
        }

        if let Some(old) = self.term.take() {
            ctx.cache.remove(&QueryKey::Search(old));
        }

        self.results = next.as_ref().map(|term| {
            debug!("[SEARCH] 搜索词变更: {}", term);
            ctx.cache.fetch(
                QueryKey::Search(term.clone()),
                make_loader(term),
                QueryOptions::default(),
            )
        });
        self.term = next;
    }
}

fn search_loader(ctx: &AppContext, term: String) -> Loader {
    let client = ctx.client.clone();
    loader(move || {
        let client = client.clone();
        let term = term.clone();
        async move {
            tmdb::search_movies(&client, &term)
                .await
                .map(QueryData::MovieList)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::query::QueryStatus;
    use crate::config::AppConfig;
    use crate::types::movie::Movie;
    use crate::view_state::overlay::overlay_state;
    use crate::view_state::location::Location;

    fn test_ctx() -> AppContext {
        AppContext::new(AppConfig {
            api_key: "test".into(),
            base_url: "http://localhost:0".into(),
            image_base_url: "http://localhost:0/img".into(),
            language: "ko-KR".into(),
            region: "KR".into(),
        })
    }

    fn result_movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.into(),
            overview: String::new(),
            backdrop_path: None,
            poster_path: None,
            release_date: String::new(),
            genre_ids: Vec::new(),
            runtime: None,
            tagline: None,
        }
    }

    #[test]
    fn blank_input_fails_validation() {
        assert!(validate_query("").is_err());
        assert!(validate_query("   ").is_err());
        assert_eq!(validate_query(" batman ").as_deref(), Ok("batman"));
    }

    #[test]
    fn submit_encodes_term_into_location() {
        let mut router = Router::new();
        SearchView::submit(&mut router, "batman begins").expect("valid input");
        assert_eq!(router.current().path, "/search");
        assert_eq!(router.current().param("query"), Some("batman begins"));
    }

    #[test]
    fn invalid_submit_does_not_navigate() {
        let mut router = Router::new();
        assert!(SearchView::submit(&mut router, "  ").is_err());
        assert_eq!(router.depth(), 1);
    }

    #[tokio::test]
    async fn term_change_evicts_old_key_and_fetches_new_one() {
        let ctx = test_ctx();
        let mut view = SearchView::new();

        let stub = |title: &'static str| {
            move |_: &str| {
                loader(move || async move {
                    Ok(QueryData::MovieList(vec![result_movie(1, title)]))
                })
            }
        };

        view.retarget(&ctx, Some("batman".into()), stub("Batman"));
        view.results
            .as_mut()
            .expect("subscription created")
            .settled()
            .await;
        assert!(ctx.cache.contains(&QueryKey::Search("batman".into())));

        view.retarget(&ctx, Some("batman begins".into()), stub("Batman Begins"));

        // 旧词条目已移除，新词独立装载
        assert!(!ctx.cache.contains(&QueryKey::Search("batman".into())));
        let entry = view
            .results
            .as_mut()
            .expect("subscription created")
            .settled()
            .await;
        assert_eq!(entry.status, QueryStatus::Success);
        assert_eq!(view.term(), Some("batman begins"));
    }

    #[tokio::test]
    async fn leaving_search_drops_subscription() {
        let ctx = test_ctx();
        let mut view = SearchView::new();

        view.retarget(&ctx, Some("batman".into()), |_| {
            loader(|| async { Ok(QueryData::MovieList(Vec::new())) })
        });
        view.results.as_mut().expect("subscribed").settled().await;

        let state = overlay_state(&Location::parse("/"));
        assert_eq!(state.search_query, None);
        view.retarget(&ctx, state.search_query, |_| {
            loader(|| async { Ok(QueryData::MovieList(Vec::new())) })
        });

        assert!(view.results.is_none());
        assert_eq!(view.term(), None);
    }
}
