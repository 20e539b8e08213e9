//! 依赖注入容器抽象接口
//!
//! 提供依赖注入容器的核心抽象

use crate::dependency::{Dependencies, Dependency};
use crate::injectable::{Implements, Injectable, InjectionTarget};
use crate::resolver::{ResolveOptions, Resolver};
use async_trait::async_trait;
use infrastructure_common::{DependencyError, DependencyResult, Disposable, Lifetime, TypeInfo};
use serde::Serialize;
use std::sync::Arc;

/// 依赖注入容器 trait
///
/// 提供完整的依赖注入功能
#[async_trait]
pub trait DiContainer: Resolver {
    /// 解析组件
    fn resolve<T>(&self) -> DependencyResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static;

    /// 解析组件，等同于 [`DiContainer::resolve`]
    fn get<T>(&self) -> DependencyResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<T>()
    }

    /// 向外部创建的对象注入字段
    fn inject_fields<T>(&self, target: &mut T) -> DependencyResult<()>
    where
        T: InjectionTarget;

    /// 检查是否已注册组件或绑定能力
    fn is_registered<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.can_resolve(&TypeInfo::of::<T>())
    }

    /// 获取所有已注册的组件描述
    fn registered_components(&self) -> Vec<ComponentDescriptor>;

    /// 验证容器状态
    fn validate(&self) -> Result<(), Vec<DependencyError>>;

    /// 获取统计信息
    fn stats(&self) -> ContainerStats;

    /// 销毁容器，释放所有已构建的单例
    async fn dispose(&self) -> DependencyResult<()>;
}

/// 容器构建器 trait
pub trait ContainerBuilder: Sized {
    /// 关联的容器类型
    type Container: DiContainer;

    /// 注册构造函数注入组件
    fn register<T>(self, lifetime: Lifetime) -> DependencyResult<Self>
    where
        T: Injectable;

    /// 注册提供函数
    fn register_factory<T, D, F>(self, lifetime: Lifetime, factory: F) -> DependencyResult<Self>
    where
        T: Send + Sync + 'static,
        D: Dependencies,
        F: Fn(D) -> T + Send + Sync + 'static;

    /// 注册预先构建的实例，总是单例
    fn register_instance<T>(self, instance: Arc<T>) -> DependencyResult<Self>
    where
        T: ?Sized + Send + Sync + 'static;

    /// 注册容器销毁时需要释放资源的单例组件
    fn register_disposable<T>(self) -> DependencyResult<Self>
    where
        T: Injectable + Disposable;

    /// 把能力 `C` 绑定到实现 `I`
    fn bind<C, I>(self) -> DependencyResult<Self>
    where
        C: ?Sized + Send + Sync + 'static,
        I: Implements<C>;

    /// 设置参数
    fn set_parameter<V>(self, name: impl Into<String>, value: V) -> DependencyResult<Self>
    where
        V: Serialize;

    /// 构建容器
    fn build(self) -> DependencyResult<Self::Container>;
}

/// 组件描述
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// 组件类型
    pub type_info: TypeInfo,
    /// 组件生命周期
    pub lifetime: Lifetime,
    /// 声明的依赖
    pub dependencies: Vec<Dependency>,
    /// 绑定到此组件的能力
    pub capabilities: Vec<TypeInfo>,
    /// 是否在容器销毁时释放
    pub disposable: bool,
}

impl ComponentDescriptor {
    /// 组件名称
    pub fn name(&self) -> String {
        self.type_info.short_name()
    }
}

/// 容器配置
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// 是否启用运行时循环依赖检测
    pub enable_circular_dependency_detection: bool,
    /// 最大解析深度
    pub max_resolution_depth: usize,
    /// 是否在构建时验证整张依赖图
    pub enable_component_validation: bool,
}

impl ContainerConfig {
    /// 解析选项
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            detect_cycles: self.enable_circular_dependency_detection,
            max_depth: self.max_resolution_depth,
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            enable_circular_dependency_detection: true,
            max_resolution_depth: 100,
            enable_component_validation: true,
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 已注册组件数量
    pub registered_components: usize,
    /// 已绑定能力数量
    pub bound_capabilities: usize,
    /// 已构建的单例数量
    pub active_singletons: usize,
    /// 根解析次数
    pub resolutions: usize,
    /// 组件构建次数
    pub constructions: usize,
    /// 解析错误数量
    pub resolution_errors: usize,
}
