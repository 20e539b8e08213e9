//! 应用启动器

use crate::application::SmartPhoneApplication;
use crate::config_sources::ParameterSources;
use di_abstractions::{ContainerBuilder, ContainerConfig};
use di_impl::{DiContainerBuilder, DiContainerImpl, Module};
use infrastructure_common::{InfrastructureError, InfrastructureResult};
use std::collections::HashMap;
use tracing::{debug, error, info};

/// 应用启动器
///
/// 负责协调参数加载、模块安装和容器构建的顺序
pub struct ApplicationBootstrapper {
    /// 参数源
    parameter_sources: ParameterSources,
    /// 需要安装的模块
    modules: Vec<Box<dyn Module>>,
    /// 容器配置
    container_config: ContainerConfig,
}

impl ApplicationBootstrapper {
    /// 创建新的应用启动器
    pub fn new(parameter_sources: ParameterSources, modules: Vec<Box<dyn Module>>) -> Self {
        Self {
            parameter_sources,
            modules,
            container_config: ContainerConfig::default(),
        }
    }

    /// 设置容器配置
    pub fn with_container_config(mut self, config: ContainerConfig) -> Self {
        self.container_config = config;
        self
    }

    /// 启动应用
    pub fn bootstrap(self) -> InfrastructureResult<SmartPhoneApplication> {
        info!("开始启动应用");

        // 第一步：加载参数
        let parameters = self.bootstrap_parameters()?;

        // 第二步：安装模块并构建容器
        let container = self.bootstrap_container(parameters)?;

        // 第三步：创建应用实例
        let application = SmartPhoneApplication::new(container);

        info!("应用启动完成: {}", application.id());
        Ok(application)
    }

    /// 加载参数
    fn bootstrap_parameters(&self) -> InfrastructureResult<HashMap<String, serde_json::Value>> {
        info!("加载容器参数");

        let parameters = self.parameter_sources.load().map_err(|e| {
            error!("参数加载失败: {}", e);
            InfrastructureError::from(e)
        })?;

        for (name, value) in &parameters {
            debug!("参数 {} = {}", name, value);
        }
        Ok(parameters)
    }

    /// 安装模块并构建容器
    fn bootstrap_container(
        &self,
        parameters: HashMap<String, serde_json::Value>,
    ) -> InfrastructureResult<DiContainerImpl> {
        info!("构建依赖注入容器，共 {} 个模块", self.modules.len());

        let builder = self.modules.iter().try_fold(
            DiContainerBuilder::new().with_config(self.container_config.clone()),
            |builder, module| builder.install(module.as_ref()),
        )?;

        let container = builder.with_parameters(parameters).build().map_err(|e| {
            error!("容器构建失败: {}", e);
            InfrastructureError::from(e)
        })?;

        Ok(container)
    }
}
