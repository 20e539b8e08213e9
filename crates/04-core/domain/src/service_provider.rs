//! 运营商

use crate::errors::DeviceResult;
use di_abstractions::Injectable;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// 网络运营商
#[derive(Debug, Default)]
pub struct ServiceProvider {
    connections: AtomicUsize,
}

impl ServiceProvider {
    /// 创建运营商
    pub fn new() -> Self {
        info!("运营商已构建");
        Self::default()
    }

    /// 连接到运营商网络
    pub fn connect(&self) -> DeviceResult<()> {
        self.connections.fetch_add(1, Ordering::Relaxed);
        info!("运营商已连接");
        Ok(())
    }

    /// 已建立的连接数
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::Relaxed)
    }
}

impl Injectable for ServiceProvider {
    type Dependencies = ();
    type Error = Infallible;

    fn inject((): Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self::new())
    }
}
