/// 覆盖层状态推导
/// 由当前位置纯函数推导，每次渲染重算，绝不单独存储

use super::location::Location;

/// 详情覆盖层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Closed,
    Open {
        movie_id: u64,
    },
}

/// 当前位置推导出的覆盖层标志
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayState {
    pub overlay: Overlay,
    pub search_query: Option<String>,
}

impl OverlayState {
    pub fn active_movie_id(&self) -> Option<u64> {
        match self.overlay {
            Overlay::Open { movie_id } => Some(movie_id),
            Overlay::Closed => None,
        }
    }
}

/// 位置 → 覆盖层状态
/// 首段为数字即打开对应影片详情；/search 暴露 query 参数
pub fn overlay_state(location: &Location) -> OverlayState {
    let first = location.segments().next();

    let overlay = first
        .and_then(|s| s.parse::<u64>().ok())
        .map(|movie_id| Overlay::Open { movie_id })
        .unwrap_or(Overlay::Closed);

    let search_query = if first == Some("search") {
        location.param("query").map(str::to_string)
    } else {
        None
    };

    OverlayState {
        overlay,
        search_query,
    }
}
