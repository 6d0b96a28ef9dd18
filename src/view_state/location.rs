/// 可导航位置
/// 路径 + 查询参数，以及进程内历史栈

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// 解析 "/search?query=batman" 形式的位置串
    pub fn parse(raw: &str) -> Self {
        let (path, qs) = match raw.split_once('?') {
            Some((p, q)) => (p, q),
            None => (raw, ""),
        };
        let path = if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        };
        let query = form_urlencoded::parse(qs.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { path, query }
    }

    /// 查询参数（同名取第一个）
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// 非空路径段
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}

/// 历史栈路由
/// 覆盖层关闭用 back 表达，与浏览器后退行为一致
#[derive(Debug)]
pub struct Router {
    stack: Vec<Location>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// 从根位置开始
    pub fn new() -> Self {
        Self {
            stack: vec![Location::parse("/")],
        }
    }

    pub fn current(&self) -> &Location {
        self.stack.last().expect("history never empty")
    }

    /// 压入新位置
    pub fn push(&mut self, raw: &str) {
        debug!("[ROUTE] push {}", raw);
        self.stack.push(Location::parse(raw));
    }

    /// 替换当前位置
    pub fn replace(&mut self, raw: &str) {
        debug!("[ROUTE] replace {}", raw);
        *self.stack.last_mut().expect("history never empty") = Location::parse(raw);
    }

    /// 后退；已在栈底则停留
    pub fn back(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_query() {
        let loc = Location::parse("/search?query=batman+begins&page=2");
        assert_eq!(loc.path, "/search");
        assert_eq!(loc.param("query"), Some("batman begins"));
        assert_eq!(loc.param("page"), Some("2"));
        assert_eq!(loc.param("missing"), None);
    }

    #[test]
    fn empty_input_normalizes_to_root() {
        let loc = Location::parse("");
        assert_eq!(loc.path, "/");
        assert_eq!(loc.segments().count(), 0);
    }

    #[test]
    fn percent_encoded_params_decode() {
        let loc = Location::parse("/search?query=%EB%B0%B0%ED%8A%B8%EB%A7%A8");
        assert_eq!(loc.param("query"), Some("배트맨"));
    }

    #[test]
    fn push_back_walks_history() {
        let mut router = Router::new();
        router.push("/550");
        assert_eq!(router.current().path, "/550");

        router.back();
        assert_eq!(router.current().path, "/");

        // 栈底不再后退
        router.back();
        assert_eq!(router.current().path, "/");
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn replace_swaps_current_location() {
        let mut router = Router::new();
        router.push("/search?query=a");
        router.replace("/search?query=b");
        assert_eq!(router.current().param("query"), Some("b"));
        assert_eq!(router.depth(), 2);
    }
}
