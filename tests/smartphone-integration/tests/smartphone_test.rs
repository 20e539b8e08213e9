//! 智能手机端到端集成测试

use di_abstractions::{ContainerBuilder, ContainerConfig, DiContainer};
use di_impl::{DiContainerBuilder, DiContainerImpl};
use infrastructure_common::{DependencyError, Lifetime, TypeInfo};
use infrastructure_composition::SmartPhoneComponent;
use smartphone_domain::{
    Battery, MemoryCard, MemorySize, NickelCadmiumBattery, ServiceProvider, SimCard, SmartPhone,
};
use std::sync::Arc;

fn phone_container(memory_size: u32) -> anyhow::Result<DiContainerImpl> {
    Ok(SmartPhoneComponent::builder()?
        .set_param::<MemorySize>(memory_size)?
        .build()?)
}

#[test]
fn test_smart_phone_is_fully_wired() -> anyhow::Result<()> {
    let container = phone_container(1000)?;

    let phone = container.get::<SmartPhone>()?;

    assert_eq!(phone.battery().name(), "NickelCadmiumBattery");
    assert_eq!(phone.sim_card().service_provider().connection_count(), 1);
    assert_eq!(phone.memory_card().size(), 1000);
    phone.make_a_call_with_recording()?;
    assert_eq!(phone.calls_made(), 1);
    Ok(())
}

#[test]
fn test_singleton_phone_and_transient_parts() -> anyhow::Result<()> {
    let container = phone_container(1000)?;

    let first = container.get::<SmartPhone>()?;
    let second = container.get::<SmartPhone>()?;
    assert!(Arc::ptr_eq(&first, &second));

    let sim_a = container.get::<SimCard>()?;
    let sim_b = container.get::<SimCard>()?;
    assert!(!Arc::ptr_eq(&sim_a, &sim_b));
    assert!(!Arc::ptr_eq(sim_a.service_provider(), sim_b.service_provider()));
    assert!(!Arc::ptr_eq(&sim_a, first.sim_card()));

    let card_a = container.get::<MemoryCard>()?;
    let card_b = container.get::<MemoryCard>()?;
    assert!(!Arc::ptr_eq(&card_a, &card_b));
    assert_eq!(*card_a, *card_b);
    Ok(())
}

#[test]
fn test_missing_battery_binding_is_unbound_capability() {
    let err = container_without_battery()
        .get::<SmartPhone>()
        .err()
        .unwrap();

    match err {
        DependencyError::UnboundCapability {
            capability,
            required_by,
        } => {
            assert_eq!(capability, "Battery");
            assert_eq!(required_by.as_deref(), Some("SmartPhone"));
        }
        other => panic!("期望能力未绑定错误, 实际: {other:?}"),
    }
}

/// 不安装电池模块、关闭构建期验证的容器
fn container_without_battery() -> DiContainerImpl {
    DiContainerBuilder::new()
        .with_config(ContainerConfig {
            enable_component_validation: false,
            ..ContainerConfig::default()
        })
        .register::<ServiceProvider>(Lifetime::Transient)
        .unwrap()
        .register::<SimCard>(Lifetime::Transient)
        .unwrap()
        .register_instance(Arc::new(MemoryCard::new(1000)))
        .unwrap()
        .register::<SmartPhone>(Lifetime::Singleton)
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_missing_memory_size_is_missing_parameter() {
    let err = SmartPhoneComponent::builder().unwrap().build().unwrap_err();
    assert!(matches!(
        err,
        DependencyError::MissingParameter { ref name, .. } if name == "memory_size"
    ));
}

#[test]
fn test_construction_order_is_topological() -> anyhow::Result<()> {
    let container = phone_container(1000)?;
    let order = container.construction_order()?;

    let position = |type_info: TypeInfo| {
        order
            .iter()
            .position(|t| *t == type_info)
            .unwrap_or_else(|| panic!("构建顺序中缺少 {type_info}"))
    };

    let phone = position(TypeInfo::of::<SmartPhone>());
    assert!(position(TypeInfo::of::<ServiceProvider>()) < position(TypeInfo::of::<SimCard>()));
    assert!(position(TypeInfo::of::<SimCard>()) < phone);
    assert!(position(TypeInfo::of::<MemoryCard>()) < phone);
    assert!(position(TypeInfo::of::<NickelCadmiumBattery>()) < phone);
    assert_eq!(order.len(), 5);
    Ok(())
}

#[test]
fn test_registered_components_describe_the_phone() -> anyhow::Result<()> {
    let container = phone_container(1000)?;
    let components = container.registered_components();

    let battery = components
        .iter()
        .find(|c| c.type_info == TypeInfo::of::<NickelCadmiumBattery>())
        .unwrap();
    assert_eq!(battery.capabilities, vec![TypeInfo::of::<dyn Battery>()]);

    let phone = components
        .iter()
        .find(|c| c.name() == "SmartPhone")
        .unwrap();
    assert_eq!(phone.lifetime, Lifetime::Singleton);
    assert!(phone.disposable);
    assert_eq!(phone.dependencies.len(), 3);

    assert!(container.is_registered::<dyn Battery>());
    assert!(container.validate().is_ok());
    Ok(())
}

#[tokio::test]
async fn test_dispose_powers_off_phone() -> anyhow::Result<()> {
    let container = phone_container(1000)?;
    let phone = container.get::<SmartPhone>()?;

    container.dispose().await?;

    assert!(phone.is_powered_off());
    assert!(phone.make_a_call_with_recording().is_err());
    assert!(matches!(
        container.get::<SmartPhone>(),
        Err(DependencyError::ContainerDisposed { .. })
    ));
    assert_eq!(container.stats().active_singletons, 0);
    Ok(())
}
