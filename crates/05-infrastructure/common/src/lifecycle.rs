//! 组件生命周期管理

use async_trait::async_trait;
use std::fmt;

/// 组件生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
    /// 单例模式 - 整个容器生命周期内只创建一个实例
    Singleton,
    /// 瞬时模式 - 每次解析都创建新实例
    #[default]
    Transient,
}

impl Lifetime {
    /// 是否为单例
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("Singleton"),
            Self::Transient => f.write_str("Transient"),
        }
    }
}

/// 可销毁组件 trait
///
/// 由容器持有的单例在容器销毁时按构建顺序的逆序调用
#[async_trait]
pub trait Disposable: Send + Sync {
    /// 释放组件持有的资源
    async fn dispose(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// 容器生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// 运行中，可以解析组件
    #[default]
    Running,
    /// 销毁中
    Disposing,
    /// 已销毁
    Disposed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_default_lifetime_is_transient() {
        assert_eq!(Lifetime::default(), Lifetime::Transient);
        assert!(Lifetime::Singleton.is_singleton());
        assert!(!Lifetime::Transient.is_singleton());
        assert_eq!(Lifetime::Singleton.to_string(), "Singleton");
    }

    struct Flagged(AtomicBool);

    #[async_trait]
    impl Disposable for Flagged {
        async fn dispose(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.0.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_disposable_hook_runs() {
        let component = Flagged(AtomicBool::new(false));
        component.dispose().await.unwrap();
        assert!(component.0.load(Ordering::SeqCst));
    }
}
