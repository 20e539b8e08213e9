//! 应用主入口

use crate::builder::ApplicationBuilder;
use di_abstractions::{ContainerStats, DiContainer, InjectionTarget};
use di_impl::DiContainerImpl;
use infrastructure_common::{DependencyResult, InfrastructureResult};
use parking_lot::RwLock;
use smartphone_domain::SmartPhone;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

/// 应用运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    /// 运行中
    Running,
    /// 停止中
    Stopping,
    /// 已停止
    Stopped,
}

/// 智能手机应用
///
/// 进程内唯一的应用实例，持有应用生命周期内的容器。
/// 不提供全局访问，调用方需要显式传递。
pub struct SmartPhoneApplication {
    /// 依赖注入容器
    container: Arc<DiContainerImpl>,
    /// 运行状态
    status: RwLock<ApplicationStatus>,
    /// 启动时间
    started_at: Instant,
}

impl SmartPhoneApplication {
    /// 创建应用构建器
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    /// 内部构造函数
    pub(crate) fn new(container: DiContainerImpl) -> Self {
        Self {
            container: Arc::new(container),
            status: RwLock::new(ApplicationStatus::Running),
            started_at: Instant::now(),
        }
    }

    /// 应用标识，与容器标识相同
    pub fn id(&self) -> Uuid {
        self.container.id()
    }

    /// 依赖注入容器
    pub fn container(&self) -> &Arc<DiContainerImpl> {
        &self.container
    }

    /// 获取手机单例
    pub fn smart_phone(&self) -> DependencyResult<Arc<SmartPhone>> {
        self.container.get::<SmartPhone>()
    }

    /// 向外部创建的对象注入字段
    pub fn inject<T: InjectionTarget>(&self, target: &mut T) -> DependencyResult<()> {
        self.container.inject_fields(target)
    }

    /// 运行状态
    pub fn status(&self) -> ApplicationStatus {
        *self.status.read()
    }

    /// 运行时长
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// 容器统计信息
    pub fn stats(&self) -> ContainerStats {
        self.container.stats()
    }

    /// 关闭应用，销毁容器中已构建的单例
    pub async fn shutdown(&self) -> InfrastructureResult<()> {
        {
            let mut status = self.status.write();
            if *status != ApplicationStatus::Running {
                warn!("应用已关闭: {}", self.id());
                return Ok(());
            }
            *status = ApplicationStatus::Stopping;
        }

        info!("关闭应用: {}", self.id());
        let result = self.container.dispose().await;
        *self.status.write() = ApplicationStatus::Stopped;

        result?;
        info!("应用关闭完成, 运行时长 {:?}", self.uptime());
        Ok(())
    }
}

impl std::fmt::Debug for SmartPhoneApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartPhoneApplication")
            .field("id", &self.id())
            .field("status", &self.status())
            .finish()
    }
}
