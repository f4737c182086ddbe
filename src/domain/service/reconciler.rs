//! 线路后台校对
//!
//! 协调器之外的 UI 代码允许直接编辑单个文档（改客户姓名、删客户），
//! 这些旁路写入不会维护跨实体不变式。校对器订阅客户集合的变更通知，
//! 每次通知都整体重算：把每条线路的站点过滤到仍然能解析回客户的那些，
//! 长度变化的线路重编号后写回。最终一致的自愈兜底，失败只记日志，
//! 下一条通知自然重试，永远不阻塞用户路径。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::RoutingConfig;
use crate::domain::model::Customer;
use crate::domain::repository::{EntityStore, WriteBatch};
use crate::domain::service::stop_sequencer;
use crate::error::RoutingResult;

/// 线路校对器
pub struct RouteReconciler {
    store: Arc<dyn EntityStore>,
    config: RoutingConfig,
}

impl RouteReconciler {
    pub fn new(store: Arc<dyn EntityStore>, config: RoutingConfig) -> Self {
        Self { store, config }
    }

    /// 单次全量校对，返回被修复的线路数
    pub async fn reconcile_once(&self) -> RoutingResult<usize> {
        let customers = self.store.list_customers().await?;
        self.reconcile_with(&customers).await
    }

    async fn reconcile_with(&self, customers: &[Customer]) -> RoutingResult<usize> {
        let by_id: HashMap<&str, &Customer> =
            customers.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut batch = WriteBatch::new();
        let mut repaired = 0usize;

        for mut route in self.store.list_routes().await? {
            let before = route.stops.len();
            let route_id = route.id.clone();
            // 站点保留条件：客户仍然存在，且指回这条线路；twice-weekly
            // 客户豁免线路匹配，它的第二条线路归属是合法的
            route.stops.retain(|stop| {
                match by_id.get(stop.customer_id.as_str()) {
                    Some(customer) => {
                        customer.route_id.as_deref() == Some(route_id.as_str())
                            || customer.allows_multi_route()
                    }
                    None => false,
                }
            });

            if route.stops.len() != before {
                let removed = before - route.stops.len();
                route.stops = stop_sequencer::renumber(route.stops);
                warn!(
                    route_id = %route.id,
                    removed,
                    "Scrubbing dangling stops from route"
                );
                batch.set_route(route);
                repaired += 1;
            }
        }

        if !batch.is_empty() {
            self.store.commit(batch).await?;
            info!(repaired, "Route reconciliation pass wrote back repairs");
        } else {
            debug!("Route reconciliation pass found nothing to repair");
        }
        Ok(repaired)
    }

    /// 启动后台校对任务
    ///
    /// 每条客户集合变更通知触发一次全量重算。通知语义是"推送当前全量
    /// 集合"，所以滞后丢消息没有关系，下一条通知会带来完整状态。
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        let mut events = self.store.subscribe_customers();
        tokio::spawn(async move {
            if self.config.reconcile_on_start {
                if let Err(e) = self.reconcile_once().await {
                    error!(error = %e, "Initial route reconciliation failed");
                }
            }

            loop {
                match events.recv().await {
                    Ok(snapshot) => {
                        if let Err(e) = self.reconcile_with(&snapshot.customers).await {
                            error!(
                                error = %e,
                                "Route reconciliation failed, will retry on next change"
                            );
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Reconciler lagged behind customer notifications");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("Customer notification channel closed, reconciler stopping");
                        break;
                    }
                }
            }
        })
    }
}
