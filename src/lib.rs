//! 线路指派与站点排序引擎
//!
//! 宠物粪便清理运营控制台的核心一致性子系统：客户↔线路↔员工的
//! 跨实体指派、站点序号的稠密维护、按邮编的指派建议，以及针对
//! 旁路写入的后台校对。表单流程、地图、日历等外围模块都只是
//! 本引擎之上的 I/O 包装。

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use config::RoutingConfig;
pub use domain::service::{AssignmentCoordinator, AssignmentOutcome, RouteReconciler};
pub use error::{RoutingError, RoutingResult};
