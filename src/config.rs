//! 路线引擎配置
//!
//! 默认值内置，可由 TOML 配置文件加载，再被 `SCOOP_ROUTING_*` 环境变量
//! 覆盖（容器部署时只动环境变量）。

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// 路线引擎配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// twice-weekly 客户最多可同时归属的线路数
    pub max_routes_per_twice_weekly: usize,
    /// 校对任务启动时是否先做一次全量校对
    pub reconcile_on_start: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_routes_per_twice_weekly: 2,
            reconcile_on_start: true,
        }
    }
}

impl RoutingConfig {
    /// 从 TOML 文件加载
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// 加载配置：文件（可选）→ 环境变量覆盖
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(cap) = env::var("SCOOP_ROUTING_TWICE_WEEKLY_CAP")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            self.max_routes_per_twice_weekly = cap;
        }
        if let Some(flag) = env::var("SCOOP_ROUTING_RECONCILE_ON_START")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
        {
            self.reconcile_on_start = flag;
        }
    }
}
