/// 领域模型
/// 网关归一化后的不可变记录，身份以 id 为准，刷新时整体替换

use serde::{Deserialize, Serialize};

/// 影片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub genre_ids: Vec<u64>,
    /// 详情接口才有
    pub runtime: Option<u32>,
    /// 详情接口才有
    pub tagline: Option<String>,
}

/// 流派，会话期间视作静态查找表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// 演员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
}

/// 职员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

/// 演职员表，与一部影片关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    pub movie_id: u64,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}
