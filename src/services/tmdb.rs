/// TMDB 网关封装
/// 每个逻辑资源一个操作，返回归一化领域记录；重试策略在客户端层

use crate::error::RemoteFetchError;
use crate::mappers::credit::map_credit;
use crate::mappers::movie::{map_genre_list, map_movie, map_movie_list};
use crate::tmdb_client::client::TmdbClient;
use crate::types::movie::{Credit, Genre, Movie};
use crate::types::tmdb::{TmdbCredits, TmdbGenreListResponse, TmdbMovie, TmdbPagedResponse};

/// 正在上映
pub async fn get_now_playing(client: &TmdbClient) -> Result<Vec<Movie>, RemoteFetchError> {
    let raw: TmdbPagedResponse = client
        .get(
            "now_playing",
            "/movie/now_playing",
            &[("region", client.region())],
        )
        .await?;
    Ok(map_movie_list(raw.results))
}

/// 热门
pub async fn get_popular(client: &TmdbClient) -> Result<Vec<Movie>, RemoteFetchError> {
    let raw: TmdbPagedResponse = client
        .get("popular", "/movie/popular", &[("region", client.region())])
        .await?;
    Ok(map_movie_list(raw.results))
}

/// 高分
pub async fn get_top_rated(client: &TmdbClient) -> Result<Vec<Movie>, RemoteFetchError> {
    let raw: TmdbPagedResponse = client
        .get(
            "top_rated",
            "/movie/top_rated",
            &[("region", client.region())],
        )
        .await?;
    Ok(map_movie_list(raw.results))
}

/// 即将上映
pub async fn get_upcoming(client: &TmdbClient) -> Result<Vec<Movie>, RemoteFetchError> {
    let raw: TmdbPagedResponse = client
        .get("upcoming", "/movie/upcoming", &[("region", client.region())])
        .await?;
    Ok(map_movie_list(raw.results))
}

/// 本周趋势
pub async fn get_trending(client: &TmdbClient) -> Result<Vec<Movie>, RemoteFetchError> {
    let raw: TmdbPagedResponse = client.get("trending", "/trending/movie/week", &[]).await?;
    Ok(map_movie_list(raw.results))
}

/// 影片详情
pub async fn get_movie_detail(
    client: &TmdbClient,
    movie_id: u64,
) -> Result<Movie, RemoteFetchError> {
    let raw: TmdbMovie = client
        .get("movie_detail", &format!("/movie/{}", movie_id), &[])
        .await?;
    map_movie(raw).ok_or(RemoteFetchError::Decode {
        resource: "movie_detail",
        message: "缺少必要字段".into(),
    })
}

/// 影片演职员
pub async fn get_movie_credits(
    client: &TmdbClient,
    movie_id: u64,
) -> Result<Credit, RemoteFetchError> {
    let raw: TmdbCredits = client
        .get(
            "movie_credits",
            &format!("/movie/{}/credits", movie_id),
            &[],
        )
        .await?;
    Ok(map_credit(movie_id, raw))
}

/// 流派列表
pub async fn get_genres(client: &TmdbClient) -> Result<Vec<Genre>, RemoteFetchError> {
    let raw: TmdbGenreListResponse = client.get("genres", "/genre/movie/list", &[]).await?;
    Ok(map_genre_list(raw.genres))
}

/// 文本搜索
pub async fn search_movies(
    client: &TmdbClient,
    query: &str,
) -> Result<Vec<Movie>, RemoteFetchError> {
    let raw: TmdbPagedResponse = client
        .get(
            "search",
            "/search/movie",
            &[("query", query), ("region", client.region())],
        )
        .await?;
    Ok(map_movie_list(raw.results))
}
