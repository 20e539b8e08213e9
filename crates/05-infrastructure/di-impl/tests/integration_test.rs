//! 依赖注入实现的集成测试

use async_trait::async_trait;
use di_abstractions::{
    ContainerBuilder, ContainerConfig, DiContainer, Injectable, InjectionTarget, Param,
    ParameterKey,
};
use di_impl::{DiContainerBuilder, DiContainerImpl, Module};
use infrastructure_common::{DependencyError, DependencyResult, Disposable, Lifetime, TypeInfo};
use parking_lot::Mutex;
use std::convert::Infallible;
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// 记录组件构建和销毁顺序
#[derive(Debug, Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    fn record(&self, event: impl Into<String>) {
        self.events.lock().push(event.into());
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

trait Storage: Send + Sync {
    fn capacity(&self) -> u64;
}

struct Capacity;

impl ParameterKey for Capacity {
    type Value = u64;
    const NAME: &'static str = "capacity";
}

struct Disk {
    capacity: u64,
}

impl Storage for Disk {
    fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl Injectable for Disk {
    type Dependencies = (Arc<EventLog>, Param<Capacity>);
    type Error = Infallible;

    fn inject((log, capacity): Self::Dependencies) -> Result<Self, Self::Error> {
        log.record("Disk");
        Ok(Self {
            capacity: capacity.into_inner(),
        })
    }
}

di_abstractions::implements!(Disk => dyn Storage);

struct Clock;

impl Injectable for Clock {
    type Dependencies = (Arc<EventLog>,);
    type Error = Infallible;

    fn inject((log,): Self::Dependencies) -> Result<Self, Self::Error> {
        log.record("Clock");
        Ok(Self)
    }
}

struct Server {
    storage: Arc<dyn Storage>,
    clock: Arc<Clock>,
}

impl Injectable for Server {
    type Dependencies = (Arc<EventLog>, Arc<dyn Storage>, Arc<Clock>);
    type Error = Infallible;

    fn inject((log, storage, clock): Self::Dependencies) -> Result<Self, Self::Error> {
        log.record("Server");
        Ok(Self { storage, clock })
    }
}

struct StorageModule;

impl Module for StorageModule {
    fn name(&self) -> &'static str {
        "StorageModule"
    }

    fn configure(&self, builder: DiContainerBuilder) -> DependencyResult<DiContainerBuilder> {
        builder
            .register::<Disk>(Lifetime::Transient)?
            .bind::<dyn Storage, Disk>()
    }
}

fn server_builder(log: Arc<EventLog>) -> DiContainerBuilder {
    DiContainerBuilder::new()
        .register_instance(log)
        .unwrap()
        .install(&StorageModule)
        .unwrap()
        .register::<Clock>(Lifetime::Transient)
        .unwrap()
        .register::<Server>(Lifetime::Singleton)
        .unwrap()
}

fn server_container(log: Arc<EventLog>) -> DiContainerImpl {
    server_builder(log)
        .set_parameter(Capacity::NAME, 512)
        .unwrap()
        .build()
        .unwrap()
}

fn without_validation() -> ContainerConfig {
    ContainerConfig {
        enable_component_validation: false,
        ..ContainerConfig::default()
    }
}

#[test]
fn test_resolves_fully_wired_graph_in_dependency_order() {
    let log = Arc::new(EventLog::default());
    let container = server_container(log.clone());

    let server = container.get::<Server>().unwrap();

    assert_eq!(server.storage.capacity(), 512);
    assert_eq!(log.events(), vec!["Disk", "Clock", "Server"]);
    assert!(!Arc::ptr_eq(&server.clock, &container.get::<Clock>().unwrap()));
}

#[test]
fn test_singleton_is_shared_and_transient_is_fresh() {
    let container = server_container(Arc::new(EventLog::default()));

    let first = container.get::<Server>().unwrap();
    let second = container.get::<Server>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let clock_a = container.get::<Clock>().unwrap();
    let clock_b = container.get::<Clock>().unwrap();
    assert!(!Arc::ptr_eq(&clock_a, &clock_b));

    let stats = container.stats();
    assert_eq!(stats.active_singletons, 2);
    assert_eq!(stats.resolutions, 4);
    assert_eq!(stats.resolution_errors, 0);
}

#[test]
fn test_capability_resolves_through_binding() {
    let container = server_container(Arc::new(EventLog::default()));

    let storage = container.get::<dyn Storage>().unwrap();
    assert_eq!(storage.capacity(), 512);
}

#[test]
fn test_missing_binding_fails_build() {
    let err = DiContainerBuilder::new()
        .register_instance(Arc::new(EventLog::default()))
        .unwrap()
        .register::<Clock>(Lifetime::Transient)
        .unwrap()
        .register::<Server>(Lifetime::Singleton)
        .unwrap()
        .build()
        .unwrap_err();

    match err {
        DependencyError::UnboundCapability {
            capability,
            required_by,
        } => {
            assert_eq!(capability, "Storage");
            assert_eq!(required_by.as_deref(), Some("Server"));
        }
        other => panic!("期望能力未绑定错误, 实际: {other:?}"),
    }
}

#[test]
fn test_missing_binding_fails_resolution_without_validation() {
    let container = DiContainerBuilder::new()
        .with_config(without_validation())
        .register_instance(Arc::new(EventLog::default()))
        .unwrap()
        .register::<Clock>(Lifetime::Transient)
        .unwrap()
        .register::<Server>(Lifetime::Singleton)
        .unwrap()
        .build()
        .unwrap();

    let err = container.get::<Server>().err().unwrap();
    assert!(matches!(err, DependencyError::UnboundCapability { .. }));
    assert_eq!(container.stats().resolution_errors, 1);
    assert!(!container
        .singleton_construction_log()
        .contains(&TypeInfo::of::<Server>()));
}

#[test]
fn test_missing_parameter_fails_build_and_resolution() {
    let log = Arc::new(EventLog::default());

    let err = server_builder(log.clone()).build().unwrap_err();
    assert!(matches!(
        err,
        DependencyError::MissingParameter { ref name, ref required_by }
            if name == "capacity" && required_by.as_deref() == Some("Disk")
    ));

    let container = server_builder(log.clone())
        .with_config(without_validation())
        .build()
        .unwrap();
    let err = container.get::<dyn Storage>().err().unwrap();
    assert!(matches!(err, DependencyError::MissingParameter { .. }));
    assert!(log.events().is_empty());
}

#[test]
fn test_invalid_parameter_value_is_reported() {
    let container = server_builder(Arc::new(EventLog::default()))
        .set_parameter(Capacity::NAME, "lots")
        .unwrap()
        .build()
        .unwrap();

    let err = container.get::<Server>().err().unwrap();
    assert!(matches!(
        err,
        DependencyError::InvalidParameter { ref name, .. } if name == "capacity"
    ));
}

struct Chicken;
struct Egg;

impl Injectable for Chicken {
    type Dependencies = (Arc<Egg>,);
    type Error = Infallible;

    fn inject(_: Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

impl Injectable for Egg {
    type Dependencies = (Arc<Chicken>,);
    type Error = Infallible;

    fn inject(_: Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

fn cyclic_builder(lifetime: Lifetime) -> DiContainerBuilder {
    DiContainerBuilder::new()
        .register::<Chicken>(lifetime)
        .unwrap()
        .register::<Egg>(lifetime)
        .unwrap()
}

#[test]
fn test_cycle_fails_build() {
    let err = cyclic_builder(Lifetime::Transient).build().unwrap_err();

    match err {
        DependencyError::CyclicDependency { dependency_chain } => {
            assert_eq!(dependency_chain, "Chicken -> Egg -> Chicken");
        }
        other => panic!("期望循环依赖错误, 实际: {other:?}"),
    }
}

#[test]
fn test_transient_cycle_fails_resolution_without_validation() {
    let container = cyclic_builder(Lifetime::Transient)
        .with_config(without_validation())
        .build()
        .unwrap();

    let err = container.get::<Chicken>().err().unwrap();
    assert!(err.is_cycle(), "{err}");
}

#[test]
fn test_cycle_without_detection_stops_at_max_depth() {
    let container = cyclic_builder(Lifetime::Transient)
        .with_config(ContainerConfig {
            enable_circular_dependency_detection: false,
            enable_component_validation: false,
            max_resolution_depth: 16,
        })
        .build()
        .unwrap();

    let err = container.get::<Egg>().err().unwrap();
    assert!(matches!(
        err,
        DependencyError::ResolutionDepthExceeded { max_depth: 16, .. }
    ));
}

#[test]
fn test_singleton_cycle_fails_build_without_validation() {
    for detect_cycles in [true, false] {
        let err = cyclic_builder(Lifetime::Singleton)
            .with_config(ContainerConfig {
                enable_circular_dependency_detection: detect_cycles,
                enable_component_validation: false,
                max_resolution_depth: 16,
            })
            .build()
            .unwrap_err();

        match err {
            DependencyError::CyclicDependency { dependency_chain } => {
                assert_eq!(dependency_chain, "Chicken -> Egg -> Chicken");
            }
            other => panic!("期望循环依赖错误, 实际: {other:?}"),
        }
    }
}

/// 构建时休眠，拉长单例构建窗口
struct Delay;

impl Injectable for Delay {
    type Dependencies = ();
    type Error = Infallible;

    fn inject((): Self::Dependencies) -> Result<Self, Self::Error> {
        std::thread::sleep(Duration::from_millis(100));
        Ok(Self)
    }
}

struct Hen;
struct Nest;

impl Injectable for Hen {
    type Dependencies = (Arc<Delay>, Arc<Nest>);
    type Error = Infallible;

    fn inject(_: Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

impl Injectable for Nest {
    type Dependencies = (Arc<Delay>, Arc<Hen>);
    type Error = Infallible;

    fn inject(_: Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

fn hen_and_nest(lifetime: Lifetime) -> DependencyResult<DiContainerImpl> {
    DiContainerBuilder::new()
        .with_config(without_validation())
        .register::<Delay>(Lifetime::Transient)?
        .register::<Hen>(lifetime)?
        .register::<Nest>(lifetime)?
        .build()
}

#[test]
fn test_singleton_cycle_across_threads_is_rejected_before_resolution() {
    let err = hen_and_nest(Lifetime::Singleton).unwrap_err();
    assert!(err.is_cycle(), "{err}");
}

#[test]
fn test_cycle_members_resolved_from_two_threads_do_not_hang() {
    let container = Arc::new(hen_and_nest(Lifetime::Transient).unwrap());
    let (tx, rx) = mpsc::channel();

    let hen_container = container.clone();
    let hen_tx = tx.clone();
    std::thread::spawn(move || {
        let _ = hen_tx.send(hen_container.get::<Hen>().err().map(|e| e.is_cycle()));
    });
    std::thread::spawn(move || {
        let _ = tx.send(container.get::<Nest>().err().map(|e| e.is_cycle()));
    });

    for _ in 0..2 {
        let outcome = rx.recv_timeout(Duration::from_secs(5)).expect("解析线程未返回");
        assert_eq!(outcome, Some(true));
    }
}

#[derive(Default)]
struct Dashboard {
    server: Option<Arc<Server>>,
    storage: Option<Arc<dyn Storage>>,
}

impl InjectionTarget for Dashboard {
    type Fields = (Arc<Server>, Arc<dyn Storage>);

    fn assign(&mut self, (server, storage): Self::Fields) {
        self.server = Some(server);
        self.storage = Some(storage);
    }
}

#[test]
fn test_inject_fields_populates_external_object() {
    let container = server_container(Arc::new(EventLog::default()));
    let mut dashboard = Dashboard::default();

    container.inject_fields(&mut dashboard).unwrap();

    let server = dashboard.server.unwrap();
    assert!(Arc::ptr_eq(&server, &container.get::<Server>().unwrap()));
    assert_eq!(dashboard.storage.unwrap().capacity(), 512);
}

#[test]
fn test_inject_fields_is_all_or_nothing() {
    let container = server_builder(Arc::new(EventLog::default()))
        .with_config(without_validation())
        .build()
        .unwrap();
    let mut dashboard = Dashboard::default();

    assert!(container.inject_fields(&mut dashboard).is_err());
    assert!(dashboard.server.is_none());
    assert!(dashboard.storage.is_none());
}

#[test]
fn test_memory_size_style_factory_uses_parameter() {
    let container = DiContainerBuilder::new()
        .register_factory(Lifetime::Transient, |(capacity,): (Param<Capacity>,)| Disk {
            capacity: *capacity * 2,
        })
        .unwrap()
        .set_param::<Capacity>(1000)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(container.get::<Disk>().unwrap().capacity(), 2000);
}

struct Connection {
    log: Arc<EventLog>,
    name: &'static str,
}

#[async_trait]
impl Disposable for Connection {
    async fn dispose(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.log.record(format!("dispose {}", self.name));
        Ok(())
    }
}

struct Database(Connection);
struct Cache(Connection, #[allow(dead_code)] Arc<Database>);

impl Injectable for Database {
    type Dependencies = (Arc<EventLog>,);
    type Error = Infallible;

    fn inject((log,): Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self(Connection {
            log,
            name: "database",
        }))
    }
}

impl Injectable for Cache {
    type Dependencies = (Arc<EventLog>, Arc<Database>);
    type Error = Infallible;

    fn inject((log, database): Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self(Connection { log, name: "cache" }, database))
    }
}

#[async_trait]
impl Disposable for Database {
    async fn dispose(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.0.dispose().await
    }
}

#[async_trait]
impl Disposable for Cache {
    async fn dispose(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.0.dispose().await
    }
}

#[tokio::test]
async fn test_dispose_runs_in_reverse_construction_order() {
    let log = Arc::new(EventLog::default());
    let container = DiContainerBuilder::new()
        .register_instance(log.clone())
        .unwrap()
        .register_disposable::<Cache>()
        .unwrap()
        .register_disposable::<Database>()
        .unwrap()
        .build()
        .unwrap();

    container.get::<Cache>().unwrap();
    container.dispose().await.unwrap();

    assert_eq!(log.events(), vec!["dispose cache", "dispose database"]);
    assert!(matches!(
        container.get::<Cache>(),
        Err(DependencyError::ContainerDisposed { .. })
    ));

    // 重复销毁不会再次调用销毁钩子
    container.dispose().await.unwrap();
    assert_eq!(log.events().len(), 2);
}

#[tokio::test]
async fn test_dispose_skips_singletons_never_constructed() {
    let log = Arc::new(EventLog::default());
    let container = DiContainerBuilder::new()
        .register_instance(log.clone())
        .unwrap()
        .register_disposable::<Database>()
        .unwrap()
        .build()
        .unwrap();

    container.dispose().await.unwrap();
    assert!(log.events().is_empty());
}

struct Part;

impl Injectable for Part {
    type Dependencies = ();
    type Error = Infallible;

    fn inject((): Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

struct Assembly;

impl Injectable for Assembly {
    type Dependencies = (Arc<Part>,);
    type Error = std::io::Error;

    fn inject(_: Self::Dependencies) -> Result<Self, Self::Error> {
        Err(std::io::Error::other("装配失败"))
    }
}

#[test]
fn test_failed_singleton_keeps_constructed_dependencies_cached() {
    let container = DiContainerBuilder::new()
        .register::<Part>(Lifetime::Singleton)
        .unwrap()
        .register::<Assembly>(Lifetime::Singleton)
        .unwrap()
        .build()
        .unwrap();

    let err = container.get::<Assembly>().err().unwrap();
    assert!(matches!(err, DependencyError::ComponentCreationFailed { .. }));

    assert_eq!(
        container.singleton_construction_log(),
        vec![TypeInfo::of::<Part>()]
    );
    assert!(container.get::<Assembly>().is_err());
}
