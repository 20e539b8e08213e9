//! SIM 卡

use crate::errors::DeviceResult;
use crate::service_provider::ServiceProvider;
use di_abstractions::Injectable;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::info;

/// SIM 卡，依赖运营商
#[derive(Debug)]
pub struct SimCard {
    service_provider: Arc<ServiceProvider>,
}

impl SimCard {
    /// 使用指定运营商创建 SIM 卡
    pub fn new(service_provider: Arc<ServiceProvider>) -> Self {
        info!("SIM 卡已构建");
        Self { service_provider }
    }

    /// 通过运营商建立连接
    pub fn get_connection(&self) -> DeviceResult<()> {
        self.service_provider.connect()
    }

    /// SIM 卡所属运营商
    pub fn service_provider(&self) -> &Arc<ServiceProvider> {
        &self.service_provider
    }
}

impl Injectable for SimCard {
    type Dependencies = (Arc<ServiceProvider>,);
    type Error = Infallible;

    fn inject((service_provider,): Self::Dependencies) -> Result<Self, Self::Error> {
        Ok(Self::new(service_provider))
    }
}
