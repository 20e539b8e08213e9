//! 并发解析集成测试

use di_abstractions::{ContainerBuilder, DiContainer, Injectable};
use di_impl::{DiContainerBuilder, DiContainerImpl};
use infrastructure_common::{Lifetime, TypeInfo};
use infrastructure_composition::SmartPhoneComponent;
use smartphone_domain::{MemorySize, SmartPhone};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_container_is_send_and_sync() {
    assert_send_sync::<DiContainerImpl>();
}

#[derive(Debug, Default)]
struct ConstructionCounter(AtomicUsize);

struct SlowSingleton;

impl Injectable for SlowSingleton {
    type Dependencies = (Arc<ConstructionCounter>,);
    type Error = Infallible;

    fn inject((counter,): Self::Dependencies) -> Result<Self, Self::Error> {
        counter.0.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        Ok(Self)
    }
}

#[test]
fn test_concurrent_singleton_is_constructed_once() {
    let counter = Arc::new(ConstructionCounter::default());
    let container = DiContainerBuilder::new()
        .register_instance(counter.clone())
        .unwrap()
        .register::<SlowSingleton>(Lifetime::Singleton)
        .unwrap()
        .build()
        .unwrap();
    let barrier = Barrier::new(THREADS);

    let instances: Vec<Arc<SlowSingleton>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    container.get::<SlowSingleton>().unwrap()
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    assert!(instances.iter().all(|i| Arc::ptr_eq(i, &instances[0])));
    assert_eq!(container.stats().resolutions, THREADS);
}

#[test]
fn test_concurrent_phone_resolution_shares_one_phone() {
    let container = Arc::new(
        SmartPhoneComponent::builder()
            .unwrap()
            .set_param::<MemorySize>(1000)
            .unwrap()
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let container = Arc::clone(&container);
            thread::spawn(move || container.get::<SmartPhone>().unwrap())
        })
        .collect();
    let phones: Vec<Arc<SmartPhone>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(phones.iter().all(|p| Arc::ptr_eq(p, &phones[0])));

    let log = container.singleton_construction_log();
    let phone_constructions = log
        .iter()
        .filter(|t| **t == TypeInfo::of::<SmartPhone>())
        .count();
    assert_eq!(phone_constructions, 1);
    assert_eq!(phones[0].sim_card().service_provider().connection_count(), 1);
}
