//! # Infrastructure Common
//!
//! 依赖注入基础设施的公共类型和 traits。
//!
//! ## 核心组件
//!
//! - [`DependencyError`] - 依赖注入错误分类
//! - [`Lifetime`] - 组件生命周期（单例 / 瞬时）
//! - [`Disposable`] - 容器销毁时的资源释放钩子
//! - [`TypeInfo`] - 类型元数据，用作注册表的键
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 显式注册优于隐式扫描
//! - 不提供任何全局状态，容器必须显式传递

pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
