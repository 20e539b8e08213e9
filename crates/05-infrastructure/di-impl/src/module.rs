//! 模块

use crate::builder::DiContainerBuilder;
use infrastructure_common::DependencyResult;

/// 模块 trait
///
/// 一组相关的注册、绑定和参数，安装到构建器上
pub trait Module: Send + Sync {
    /// 模块名称
    fn name(&self) -> &'static str;

    /// 把模块的注册应用到构建器
    fn configure(&self, builder: DiContainerBuilder) -> DependencyResult<DiContainerBuilder>;
}
