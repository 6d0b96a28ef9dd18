/// tmdb-front 配置模块
/// 支持环境变量和默认值

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TMDB API Key（必填，来自环境变量）
    pub api_key: String,
    /// TMDB API 基础地址
    pub base_url: String,
    /// 图片服务基础地址
    pub image_base_url: String,
    /// 请求语言
    pub language: String,
    /// 地区（仅列表接口使用）
    pub region: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("TMDB_API_KEY").unwrap_or_default(),
            base_url: std::env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| "https://api.themoviedb.org/3".into()),
            image_base_url: std::env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|_| "https://image.tmdb.org/t/p".into()),
            language: std::env::var("TMDB_LANGUAGE").unwrap_or_else(|_| "ko-KR".into()),
            region: std::env::var("TMDB_REGION").unwrap_or_else(|_| "KR".into()),
        }
    }
}
