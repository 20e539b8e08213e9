//! 参数源
//!
//! 从配置文件和环境变量加载容器参数。所有参数位于 `parameters` 节点下：
//!
//! ```toml
//! [parameters]
//! memory_size = 1000
//! ```
//!
//! 环境变量使用 `<前缀>_PARAMETERS__<参数名>` 的形式，例如
//! `PHONE_PARAMETERS__MEMORY_SIZE=2000`。后添加的源覆盖先添加的源。

use config::{Config, Environment, File, FileFormat};
use infrastructure_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// 参数节点名
const PARAMETERS_SECTION: &str = "parameters";

/// 参数源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSourceType {
    /// TOML 文件
    Toml,
    /// JSON 文件
    Json,
    /// YAML 文件
    Yaml,
    /// 环境变量
    Environment,
}

/// 参数源描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSourceDescriptor {
    /// 参数源类型
    pub source_type: ParameterSourceType,
    /// 文件路径或环境变量前缀
    pub location: String,
    /// 文件不存在时是否报错
    pub required: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ParameterDocument {
    #[serde(default)]
    parameters: HashMap<String, serde_json::Value>,
}

/// 参数源集合
///
/// 按添加顺序合并，最后应用显式覆盖的参数
#[derive(Debug, Clone, Default)]
pub struct ParameterSources {
    sources: Vec<ParameterSourceDescriptor>,
    overrides: HashMap<String, serde_json::Value>,
}

impl ParameterSources {
    /// 创建空的参数源集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 TOML 文件
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P, required: bool) -> Self {
        self.add_file(ParameterSourceType::Toml, path.as_ref(), required)
    }

    /// 添加 JSON 文件
    pub fn add_json_file<P: AsRef<Path>>(self, path: P, required: bool) -> Self {
        self.add_file(ParameterSourceType::Json, path.as_ref(), required)
    }

    /// 添加 YAML 文件
    pub fn add_yaml_file<P: AsRef<Path>>(self, path: P, required: bool) -> Self {
        self.add_file(ParameterSourceType::Yaml, path.as_ref(), required)
    }

    /// 添加环境变量参数源
    pub fn add_environment<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        debug!("添加环境变量参数源，前缀: {}", prefix);
        self.sources.push(ParameterSourceDescriptor {
            source_type: ParameterSourceType::Environment,
            location: prefix,
            required: false,
        });
        self
    }

    /// 显式设置参数，优先级最高
    pub fn add_override<V: Serialize>(
        mut self,
        name: impl Into<String>,
        value: V,
    ) -> ConfigResult<Self> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|e| ConfigError::TypeConversionError {
            message: format!("参数 {name} 无法序列化: {e}"),
        })?;

        debug!("覆盖参数: {}", name);
        self.overrides.insert(name, value);
        Ok(self)
    }

    /// 已添加的参数源
    pub fn get_sources(&self) -> &[ParameterSourceDescriptor] {
        &self.sources
    }

    /// 加载并合并所有参数
    pub fn load(&self) -> ConfigResult<HashMap<String, serde_json::Value>> {
        info!("开始加载参数，共有 {} 个参数源", self.sources.len());

        let mut builder = Config::builder();
        for source in &self.sources {
            builder = match source.source_type {
                ParameterSourceType::Environment => builder.add_source(
                    Environment::with_prefix(&source.location)
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
                file_type => {
                    if source.required && !Path::new(&source.location).exists() {
                        return Err(ConfigError::FileNotFound {
                            path: source.location.clone(),
                        });
                    }

                    builder.add_source(
                        File::new(&source.location, file_format(file_type))
                            .required(source.required),
                    )
                }
            };
        }

        let document: ParameterDocument = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        let mut parameters = document.parameters;
        parameters.extend(self.overrides.clone());

        info!("参数加载完成，共 {} 个参数", parameters.len());
        Ok(parameters)
    }

    fn add_file(mut self, source_type: ParameterSourceType, path: &Path, required: bool) -> Self {
        debug!("添加参数文件: {} ({:?})", path.display(), source_type);
        self.sources.push(ParameterSourceDescriptor {
            source_type,
            location: path.to_string_lossy().to_string(),
            required,
        });
        self
    }
}

fn file_format(source_type: ParameterSourceType) -> FileFormat {
    match source_type {
        ParameterSourceType::Json => FileFormat::Json,
        ParameterSourceType::Yaml => FileFormat::Yaml,
        ParameterSourceType::Toml | ParameterSourceType::Environment => FileFormat::Toml,
    }
}
