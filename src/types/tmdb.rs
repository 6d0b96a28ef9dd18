/// TMDB API 类型定义
/// 外部响应一律宽松解析，缺失字段取默认值，入口处再归一化

use serde::Deserialize;

/// 列表接口响应（results 包装）
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbPagedResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// 影片（列表与详情共用，详情接口多出 runtime/tagline/genres）
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbMovie {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub tagline: Option<String>,
}

/// 流派
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbGenre {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// 流派列表接口响应
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbGenreListResponse {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

/// 演职员接口响应
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbCredits {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub cast: Vec<TmdbCastEntry>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewEntry>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbCastEntry {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbCrewEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// 上游错误响应体
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbErrorBody {
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub status_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_payload_tolerates_missing_fields() {
        let raw = r#"{"results":[{"id":550,"title":"Fight Club"}]}"#;
        let parsed: TmdbPagedResponse =
            serde_json::from_str(raw).expect("should parse partial payload");
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].id, 550);
        assert_eq!(parsed.results[0].backdrop_path, None);
        assert!(parsed.results[0].genre_ids.is_empty());
    }

    #[test]
    fn detail_payload_parses_genres_and_runtime() {
        let raw = r#"{
            "id": 550,
            "title": "Fight Club",
            "runtime": 139,
            "tagline": "Mischief. Mayhem. Soap.",
            "genres": [{"id": 18, "name": "Drama"}]
        }"#;
        let parsed: TmdbMovie = serde_json::from_str(raw).expect("should parse detail payload");
        assert_eq!(parsed.runtime, Some(139));
        assert_eq!(parsed.genres.len(), 1);
        assert_eq!(parsed.genres[0].name, "Drama");
    }
}
