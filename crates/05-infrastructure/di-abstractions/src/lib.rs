//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件注册和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`Injectable`] - 通过构造函数注入创建的组件
//! - [`Dependencies`] - 由元组类型推导出的依赖签名
//! - [`ComponentFactory`] - 组件工厂接口
//! - [`BindingRegistry`] - 能力到实现的绑定表
//! - [`ScopeManager`] - 生命周期查询
//! - [`Resolver`] / [`DiContainer`] - 依赖解析和容器接口

pub mod container;
pub mod dependency;
pub mod factory;
pub mod injectable;
pub mod instance;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use container::*;
pub use dependency::*;
pub use factory::*;
pub use injectable::*;
pub use instance::*;
pub use registry::*;
pub use resolver::*;
pub use scope::*;
