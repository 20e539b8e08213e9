//! # 依赖注入具体实现
//!
//! 提供具体的依赖注入容器、绑定注册表、作用域管理器和实例缓存实现。
//!
//! ```rust,ignore
//! let container = DiContainerBuilder::new()
//!     .register::<ServiceProvider>(Lifetime::Transient)?
//!     .register::<SimCard>(Lifetime::Transient)?
//!     .bind::<dyn Battery, NickelCadmiumBattery>()?
//!     .set_parameter("memory_size", 1000)?
//!     .build()?;
//!
//! let phone = container.get::<SmartPhone>()?;
//! ```

mod bindings;
mod builder;
mod cache;
mod container;
mod module;
mod registration;
mod scope;
mod validation;

pub use bindings::BindingRegistryImpl;
pub use builder::DiContainerBuilder;
pub use cache::InstanceCache;
pub use container::DiContainerImpl;
pub use module::Module;
pub use scope::ScopeManagerImpl;
