/// tmdb-front 入口
/// 终端演示壳：装载首页分类并演示详情覆盖层导航

use tracing::{info, warn};

use tmdb_front::config::AppConfig;
use tmdb_front::context::AppContext;
use tmdb_front::view_state::location::Router;
use tmdb_front::view_state::overlay::overlay_state;
use tmdb_front::views::detail::{DetailState, DetailView};
use tmdb_front::views::home::{HomeView, SectionState};
use tmdb_front::views::slider::Slider;

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env();

    println!(
        r#"
╔══════════════════════════════════════╗
║       tmdb-front v0.1.0 (Rust)       ║
║     TMDB 电影发现 · 数据核心演示     ║
╚══════════════════════════════════════╝
"#
    );
    println!("API 地址:   {}", config.base_url);
    println!("语言/地区:  {} / {}", config.language, config.region);
    println!();

    if config.api_key.is_empty() {
        warn!("未设置 TMDB_API_KEY，请求将被上游拒绝");
    }

    let ctx = AppContext::new(config);
    let mut router = Router::new();

    // 首页：四个分类并发装载，各自独立完成
    let mut home = HomeView::mount(&ctx);
    home.settle_all().await;

    for (name, section) in home.sections() {
        match section {
            SectionState::Ready(movies) => {
                let slider = Slider::new(movies.len());
                let titles: Vec<&str> = slider
                    .window(&movies)
                    .iter()
                    .map(|m| m.title.as_str())
                    .collect();
                info!("{}: {} 部，第一页: {}", name, movies.len(), titles.join(" / "));
            }
            SectionState::Failed { error, .. } => warn!("{} 装载失败: {}", name, error),
            SectionState::Loading => info!("{}: 加载中", name),
        }
    }

    if let Some(hero) = home.hero() {
        let brief: String = hero.overview.chars().take(60).collect();
        info!("主打影片: {} —— {}", hero.title, brief);

        // 打开详情覆盖层 = 导航到 /{movieId}
        router.push(&format!("/{}", hero.id));
        let state = overlay_state(router.current());
        ctx.scroll.sync(&state);

        if let Some(movie_id) = state.active_movie_id() {
            let mut view = DetailView::mount(&ctx, movie_id);
            view.detail.settled().await;
            view.credits.settled().await;

            match view.state() {
                DetailState::Ready { movie, credit } => {
                    info!("详情: {} ({} 分钟)", movie.title, movie.runtime.unwrap_or(0));
                    if let Some(director) = DetailView::director(&credit) {
                        info!("导演: {}", director.name);
                    }
                    info!("出演: {}", DetailView::cast_line(&credit));
                }
                DetailState::Missing(e) => warn!("{}", e),
                DetailState::Failed(e) => warn!("详情装载失败: {}", e),
                DetailState::Loading => {}
            }
        }

        // 关闭覆盖层 = 后退
        router.back();
        ctx.scroll.sync(&overlay_state(router.current()));
    }

    info!("演示结束，缓存条目数: {}", ctx.cache.len());
}
