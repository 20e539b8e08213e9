//! # 组合根
//!
//! 这个 crate 是智能手机示例的组合根，负责把领域组件注册到容器中，
//! 并在进程启动时构建唯一的应用容器。
//!
//! ## 主要功能
//!
//! - **模块**: 按部件划分的注册单元，见 [`SmartPhoneComponent`]
//! - **参数源**: 从配置文件和环境变量加载构造参数
//! - **应用构建器**: 使用构建者模式组装应用、初始化日志
//! - **生命周期管理**: 显式的启动和关闭，没有全局状态
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::ApplicationBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let application = ApplicationBuilder::new()
//!         .with_memory_size(1000)?
//!         .build()?;
//!
//!     let phone = application.smart_phone()?;
//!     phone.make_a_call_with_recording()?;
//!
//!     application.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod bootstrapper;
pub mod builder;
pub mod config_sources;
pub mod modules;


// 重新导出主要类型
pub use application::{ApplicationStatus, SmartPhoneApplication};
pub use bootstrapper::ApplicationBootstrapper;
pub use builder::{ApplicationBuilder, LoggingConfig};
pub use config_sources::{ParameterSourceDescriptor, ParameterSourceType, ParameterSources};
pub use modules::{
    MemoryCardModule, NcBatteryModule, ServiceProviderModule, SimCardModule, SmartPhoneComponent,
    SmartPhoneModule,
};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
