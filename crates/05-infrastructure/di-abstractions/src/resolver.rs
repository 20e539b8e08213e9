//! 组件解析器抽象接口
//!
//! 提供依赖解析和组件实例化的能力

use crate::instance::{downcast, AnyInstance};
use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use std::sync::Arc;

/// 组件解析器 trait
///
/// 对象安全的类型擦除接口，工厂通过它解析自己声明的依赖
pub trait Resolver: Send + Sync {
    /// 在给定的解析上下文中解析组件
    fn resolve_erased(
        &self,
        type_info: TypeInfo,
        ctx: &mut ResolveContext,
    ) -> DependencyResult<AnyInstance>;

    /// 读取外部提供的参数
    fn parameter(&self, name: &str) -> Option<serde_json::Value>;

    /// 检查是否可以解析指定类型（已注册或已绑定）
    fn can_resolve(&self, type_info: &TypeInfo) -> bool;
}

/// 带类型的解析扩展
pub trait ResolverExt: Resolver {
    /// 在给定的解析上下文中解析指定类型的组件
    fn resolve_in<T>(&self, ctx: &mut ResolveContext) -> DependencyResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let instance = self.resolve_erased(TypeInfo::of::<T>(), ctx)?;
        downcast::<T>(&instance)
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}

/// 解析上下文
///
/// 保存当前正在解析的类型链，用于循环依赖检测
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<TypeInfo>,
    /// 解析选项
    pub options: ResolveOptions,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            resolution_chain: Vec::new(),
            options,
        }
    }

    /// 添加类型到解析链
    pub fn push_type(&mut self, type_info: TypeInfo) -> DependencyResult<()> {
        self.push(type_info, self.options.detect_cycles)
    }

    /// 添加类型到解析链，无论选项如何都检测循环依赖
    pub fn push_type_checked(&mut self, type_info: TypeInfo) -> DependencyResult<()> {
        self.push(type_info, true)
    }

    fn push(&mut self, type_info: TypeInfo, detect_cycles: bool) -> DependencyResult<()> {
        if detect_cycles {
            if let Some(start) = self.resolution_chain.iter().position(|t| *t == type_info) {
                let chain = self.resolution_chain[start..]
                    .iter()
                    .chain(std::iter::once(&type_info))
                    .map(TypeInfo::short_name)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(DependencyError::CyclicDependency {
                    dependency_chain: chain,
                });
            }
        }

        if self.resolution_chain.len() >= self.options.max_depth {
            return Err(DependencyError::ResolutionDepthExceeded {
                type_name: type_info.short_name(),
                max_depth: self.options.max_depth,
            });
        }

        self.resolution_chain.push(type_info);
        Ok(())
    }

    /// 从解析链中移除类型
    pub fn pop_type(&mut self) {
        self.resolution_chain.pop();
    }

    /// 正在解析的类型（即当前依赖的请求方）
    pub fn current(&self) -> Option<&TypeInfo> {
        self.resolution_chain.last()
    }

    /// 当前依赖的请求方名称，用于错误信息
    pub fn required_by(&self) -> Option<String> {
        self.current().map(TypeInfo::short_name)
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }
}

/// 解析选项
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// 是否启用运行时循环依赖检测
    pub detect_cycles: bool,
    /// 最大递归深度
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            max_depth: 100,
        }
    }
}
