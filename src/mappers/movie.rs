/// 影片映射器
/// TMDB 原始响应 → 领域 Movie，并构造图片地址

use tracing::warn;

use crate::types::movie::{Genre, Movie};
use crate::types::tmdb::{TmdbGenre, TmdbMovie};

/// 构造 TMDB 图片地址，尺寸默认 original
pub fn image_url(image_base: &str, path: &str, size: Option<&str>) -> String {
    format!(
        "{}/{}/{}",
        image_base.trim_end_matches('/'),
        size.unwrap_or("original"),
        path.trim_start_matches('/')
    )
}

/// 海报地址
pub fn poster_url(movie: &Movie, image_base: &str, size: Option<&str>) -> Option<String> {
    movie
        .poster_path
        .as_deref()
        .map(|p| image_url(image_base, p, size))
}

/// 背景图地址
pub fn backdrop_url(movie: &Movie, image_base: &str, size: Option<&str>) -> Option<String> {
    movie
        .backdrop_path
        .as_deref()
        .map(|p| image_url(image_base, p, size))
}

/// 单条影片归一化
/// id 或标题缺失的条目视为坏数据，丢弃
pub fn map_movie(raw: TmdbMovie) -> Option<Movie> {
    if raw.id <= 0 || raw.title.is_empty() {
        warn!("[MAPPER] 丢弃坏条目: id={} title={:?}", raw.id, raw.title);
        return None;
    }

    // 列表接口给 genre_ids，详情接口给完整 genres，统一成 id 序列
    let genre_ids: Vec<u64> = if raw.genre_ids.is_empty() {
        raw.genres
            .iter()
            .filter(|g| g.id > 0)
            .map(|g| g.id as u64)
            .collect()
    } else {
        raw.genre_ids
            .iter()
            .filter(|id| **id > 0)
            .map(|id| *id as u64)
            .collect()
    };

    Some(Movie {
        id: raw.id as u64,
        title: raw.title,
        overview: raw.overview,
        backdrop_path: raw.backdrop_path.filter(|p| !p.is_empty()),
        poster_path: raw.poster_path.filter(|p| !p.is_empty()),
        release_date: raw.release_date,
        genre_ids,
        runtime: raw.runtime.filter(|r| *r > 0).map(|r| r as u32),
        tagline: raw.tagline.filter(|t| !t.is_empty()),
    })
}

/// 列表归一化，坏条目跳过不报错
pub fn map_movie_list(raw: Vec<TmdbMovie>) -> Vec<Movie> {
    raw.into_iter().filter_map(map_movie).collect()
}

/// 流派列表归一化
pub fn map_genre_list(raw: Vec<TmdbGenre>) -> Vec<Genre> {
    raw.into_iter()
        .filter(|g| g.id > 0 && !g.name.is_empty())
        .map(|g| Genre {
            id: g.id as u64,
            name: g.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_movie(id: i64, title: &str) -> TmdbMovie {
        TmdbMovie {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn drops_entries_without_id_or_title() {
        let list = vec![
            raw_movie(550, "Fight Club"),
            raw_movie(0, "ghost"),
            raw_movie(680, ""),
        ];
        let mapped = map_movie_list(list);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].id, 550);
    }

    #[test]
    fn detail_genres_collapse_to_genre_ids() {
        let mut raw = raw_movie(550, "Fight Club");
        raw.genres = vec![
            TmdbGenre {
                id: 18,
                name: "Drama".into(),
            },
            TmdbGenre {
                id: 53,
                name: "Thriller".into(),
            },
        ];
        let movie = map_movie(raw).expect("should map");
        assert_eq!(movie.genre_ids, vec![18, 53]);
    }

    #[test]
    fn empty_paths_normalize_to_none() {
        let mut raw = raw_movie(550, "Fight Club");
        raw.poster_path = Some(String::new());
        raw.backdrop_path = Some("/x.jpg".into());
        let movie = map_movie(raw).expect("should map");
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.backdrop_path.as_deref(), Some("/x.jpg"));
    }

    #[test]
    fn image_url_joins_base_size_and_path() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/", "/x.jpg", None),
            "https://image.tmdb.org/t/p/original/x.jpg"
        );
        assert_eq!(
            image_url("https://image.tmdb.org/t/p", "x.jpg", Some("w500")),
            "https://image.tmdb.org/t/p/w500/x.jpg"
        );
    }

    #[test]
    fn genre_list_drops_nameless_entries() {
        let raw = vec![
            TmdbGenre {
                id: 18,
                name: "Drama".into(),
            },
            TmdbGenre {
                id: 0,
                name: "broken".into(),
            },
            TmdbGenre {
                id: 53,
                name: String::new(),
            },
        ];
        let mapped = map_genre_list(raw);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].name, "Drama");
    }
}
