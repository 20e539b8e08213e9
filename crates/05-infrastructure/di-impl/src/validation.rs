//! 构建期依赖图验证

use crate::bindings::BindingRegistryImpl;
use crate::registration::Registration;
use di_abstractions::{
    BindingRegistry, CircularDependencyDetector, DefaultCircularDependencyDetector, Dependency,
    DependencyGraphNode,
};
use infrastructure_common::{DependencyError, DependencyResult, Lifetime, TypeInfo};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 依赖图验证器
pub(crate) struct GraphValidator<'a> {
    pub registrations: &'a HashMap<TypeInfo, Registration>,
    pub order: &'a [TypeInfo],
    pub bindings: &'a BindingRegistryImpl,
    pub parameters: &'a HashMap<String, serde_json::Value>,
}

impl GraphValidator<'_> {
    /// 验证所有依赖都可满足且依赖图无环
    pub fn validate(&self) -> Result<(), Vec<DependencyError>> {
        let mut errors = Vec::new();

        for type_info in self.order {
            let Some(registration) = self.registrations.get(type_info) else {
                continue;
            };

            for dependency in registration.factory.dependencies() {
                match dependency {
                    Dependency::Component(required) => {
                        if !self.is_satisfiable(&required) {
                            errors.push(DependencyError::unbound(
                                required.short_name(),
                                Some(type_info.short_name()),
                            ));
                        }
                    }
                    Dependency::Parameter { name, .. } => {
                        if !self.parameters.contains_key(name) {
                            errors.push(DependencyError::missing_parameter(
                                name,
                                Some(type_info.short_name()),
                            ));
                        }
                    }
                }
            }
        }

        for binding in self.bindings.bindings() {
            if !self.registrations.contains_key(&binding.implementation) {
                errors.push(DependencyError::unbound(
                    binding.implementation.short_name(),
                    Some(binding.capability.short_name()),
                ));
            }
        }

        if let Err(e) = DefaultCircularDependencyDetector.detect_circular_dependencies(&self.graph())
        {
            errors.push(e);
        }

        if errors.is_empty() {
            debug!("依赖图验证通过: {} 个组件", self.order.len());
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 已注册组件的构建顺序（拓扑序）
    pub fn construction_order(&self) -> DependencyResult<Vec<TypeInfo>> {
        let order = DefaultCircularDependencyDetector.topological_order(&self.graph())?;
        Ok(order
            .into_iter()
            .filter(|type_info| self.registrations.contains_key(type_info))
            .collect())
    }

    /// 检查经过单例的依赖环
    ///
    /// 单例构建期间持有自己的 once cell，经过单例的环在多线程解析时会互相等待，
    /// 所以关闭完整验证时也要在构建容器时执行。
    pub fn check_singleton_cycles(&self) -> DependencyResult<()> {
        let graph: HashMap<TypeInfo, Vec<TypeInfo>> = self
            .graph()
            .into_iter()
            .map(|node| (node.type_info, node.dependencies))
            .collect();

        for type_info in self.order {
            let is_singleton = self
                .registrations
                .get(type_info)
                .is_some_and(|registration| registration.lifetime == Lifetime::Singleton);
            if !is_singleton {
                continue;
            }

            let mut path = vec![*type_info];
            let mut visited = HashSet::new();
            if Self::path_back_to(*type_info, *type_info, &graph, &mut visited, &mut path) {
                let chain = path
                    .iter()
                    .map(TypeInfo::short_name)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(DependencyError::CyclicDependency {
                    dependency_chain: chain,
                });
            }
        }

        Ok(())
    }

    fn path_back_to(
        target: TypeInfo,
        current: TypeInfo,
        graph: &HashMap<TypeInfo, Vec<TypeInfo>>,
        visited: &mut HashSet<TypeInfo>,
        path: &mut Vec<TypeInfo>,
    ) -> bool {
        for dependency in graph.get(&current).into_iter().flatten() {
            if *dependency == target {
                path.push(target);
                return true;
            }
            if visited.insert(*dependency) {
                path.push(*dependency);
                if Self::path_back_to(target, *dependency, graph, visited, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// 构建依赖图：组件节点指向其组件依赖，能力节点指向绑定的实现
    fn graph(&self) -> Vec<DependencyGraphNode> {
        let components = self.order.iter().filter_map(|type_info| {
            self.registrations
                .get(type_info)
                .map(|registration| DependencyGraphNode {
                    type_info: *type_info,
                    dependencies: registration
                        .factory
                        .dependencies()
                        .into_iter()
                        .filter_map(|dependency| match dependency {
                            Dependency::Component(required) => Some(required),
                            Dependency::Parameter { .. } => None,
                        })
                        .collect(),
                })
        });

        let capabilities = self
            .bindings
            .bindings()
            .into_iter()
            .map(|binding| DependencyGraphNode {
                type_info: binding.capability,
                dependencies: vec![binding.implementation],
            });

        components.chain(capabilities).collect()
    }

    fn is_satisfiable(&self, type_info: &TypeInfo) -> bool {
        self.registrations.contains_key(type_info) || self.bindings.binding_for(type_info).is_some()
    }
}
