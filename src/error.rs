/// 错误类型定义
/// 网关失败、搜索输入校验、影片不存在三类

use thiserror::Error;

/// 远端请求失败
/// 携带资源名与失败原因，由缓存层记录在条目上，不再向外抛
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFetchError {
    #[error("{resource}: 上游返回 HTTP {status}")]
    Http { resource: &'static str, status: u16 },
    #[error("{resource}: 请求超时")]
    Timeout { resource: &'static str },
    #[error("{resource}: 网络错误: {message}")]
    Network {
        resource: &'static str,
        message: String,
    },
    #[error("{resource}: 响应解析失败: {message}")]
    Decode {
        resource: &'static str,
        message: String,
    },
}

impl RemoteFetchError {
    /// 失败的资源名
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Http { resource, .. }
            | Self::Timeout { resource }
            | Self::Network { resource, .. }
            | Self::Decode { resource, .. } => resource,
        }
    }

    /// HTTP 状态码（仅 Http 变体有）
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// 搜索输入校验失败
/// 在表单边界就地恢复，不进入缓存层
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// 请求的影片不存在，按降级渲染处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("影片 {movie_id} 不存在")]
pub struct NotFoundError {
    pub movie_id: u64,
}
