//! 智能手机模块
//!
//! 每个模块负责一个部件的注册，[`SmartPhoneComponent`] 列出组装整部手机所需的全部模块。

use di_abstractions::{ContainerBuilder, Param};
use di_impl::{DiContainerBuilder, Module};
use infrastructure_common::{DependencyResult, Lifetime};
use smartphone_domain::{
    Battery, MemoryCard, MemorySize, NickelCadmiumBattery, ServiceProvider, SimCard, SmartPhone,
};
use tracing::info;

/// 运营商模块
#[derive(Debug, Default)]
pub struct ServiceProviderModule;

impl Module for ServiceProviderModule {
    fn name(&self) -> &'static str {
        "ServiceProviderModule"
    }

    fn configure(&self, builder: DiContainerBuilder) -> DependencyResult<DiContainerBuilder> {
        builder.register::<ServiceProvider>(Lifetime::Transient)
    }
}

/// SIM 卡模块
#[derive(Debug, Default)]
pub struct SimCardModule;

impl Module for SimCardModule {
    fn name(&self) -> &'static str {
        "SimCardModule"
    }

    fn configure(&self, builder: DiContainerBuilder) -> DependencyResult<DiContainerBuilder> {
        builder.register::<SimCard>(Lifetime::Transient)
    }
}

/// 存储卡模块
///
/// 通过提供函数创建存储卡，容量来自 [`MemorySize`] 参数
#[derive(Debug, Default)]
pub struct MemoryCardModule;

impl MemoryCardModule {
    fn provide_memory_card((memory_size,): (Param<MemorySize>,)) -> MemoryCard {
        info!("存储卡容量: {}MB", *memory_size);
        MemoryCard::new(memory_size.into_inner())
    }
}

impl Module for MemoryCardModule {
    fn name(&self) -> &'static str {
        "MemoryCardModule"
    }

    fn configure(&self, builder: DiContainerBuilder) -> DependencyResult<DiContainerBuilder> {
        builder.register_factory(Lifetime::Transient, Self::provide_memory_card)
    }
}

/// 镍镉电池模块，把 [`Battery`] 能力绑定到 [`NickelCadmiumBattery`]
#[derive(Debug, Default)]
pub struct NcBatteryModule;

impl Module for NcBatteryModule {
    fn name(&self) -> &'static str {
        "NcBatteryModule"
    }

    fn configure(&self, builder: DiContainerBuilder) -> DependencyResult<DiContainerBuilder> {
        builder
            .register::<NickelCadmiumBattery>(Lifetime::Transient)?
            .bind::<dyn Battery, NickelCadmiumBattery>()
    }
}

/// 手机模块，手机在容器中是单例，容器销毁时关机
#[derive(Debug, Default)]
pub struct SmartPhoneModule;

impl Module for SmartPhoneModule {
    fn name(&self) -> &'static str {
        "SmartPhoneModule"
    }

    fn configure(&self, builder: DiContainerBuilder) -> DependencyResult<DiContainerBuilder> {
        builder.register_disposable::<SmartPhone>()
    }
}

/// 智能手机组件：组装整部手机所需的模块集合
#[derive(Debug, Default)]
pub struct SmartPhoneComponent;

impl SmartPhoneComponent {
    /// 组件包含的全部模块
    pub fn modules() -> Vec<Box<dyn Module>> {
        vec![
            Box::new(ServiceProviderModule),
            Box::new(SimCardModule),
            Box::new(MemoryCardModule),
            Box::new(NcBatteryModule),
            Box::new(SmartPhoneModule),
        ]
    }

    /// 安装全部模块后的容器构建器，参数仍需调用方设置
    pub fn builder() -> DependencyResult<DiContainerBuilder> {
        Self::modules()
            .iter()
            .try_fold(DiContainerBuilder::new(), |builder, module| {
                builder.install(module.as_ref())
            })
    }
}
