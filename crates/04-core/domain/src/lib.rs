//! # SmartPhone Domain
//!
//! 智能手机领域模型。每个部件都声明自己的依赖，由组合根中的容器负责组装：
//!
//! - [`Battery`] - 电池能力，[`NickelCadmiumBattery`] 是它的实现
//! - [`SimCard`] - 依赖 [`ServiceProvider`] 的 SIM 卡
//! - [`MemoryCard`] - 需要 [`MemorySize`] 参数的存储卡
//! - [`SmartPhone`] - 依赖以上三者的单例根对象

pub mod battery;
pub mod errors;
pub mod memory_card;
pub mod service_provider;
pub mod sim_card;
pub mod smart_phone;

pub use battery::*;
pub use errors::*;
pub use memory_card::*;
pub use service_provider::*;
pub use sim_card::*;
pub use smart_phone::*;
