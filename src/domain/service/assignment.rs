//! 指派协调器 - 跨实体写入的业务逻辑
//!
//! 客户↔线路↔员工三方关系的唯一合法修改入口。每个操作都是一次
//! 读取→计算→单个原子批量写的序列：相关文档先整体读进内存，新的一致
//! 状态在内存里算好，最后一次性提交。存储拒绝批次时不会留下任何部分
//! 状态，调用方可以用相同输入安全重试。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::RoutingConfig;
use crate::domain::model::{AssignedTech, Stop};
use crate::domain::repository::{EntityStore, WriteBatch};
use crate::domain::service::stop_sequencer;
use crate::error::{RoutingError, RoutingResult};

/// 指派操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// 客户已指派到目标线路
    Assigned,
    /// 目标线路已有该客户的站点，本次为空操作（对双击幂等）
    AlreadyAssigned,
}

/// 指派协调器
pub struct AssignmentCoordinator {
    store: Arc<dyn EntityStore>,
    config: RoutingConfig,
}

impl AssignmentCoordinator {
    pub fn new(store: Arc<dyn EntityStore>, config: RoutingConfig) -> Self {
        Self { store, config }
    }

    /// 把客户指派到线路
    ///
    /// # 业务规则
    /// - 目标线路已有该客户的站点：空操作，返回 `AlreadyAssigned`
    /// - 客户已归属其他线路且服务类型不是 twice-weekly：`ConflictingAssignment`
    /// - twice-weekly 客户最多同时归属 `max_routes_per_twice_weekly` 条线路
    ///   （默认 2），超出同样拒绝
    pub async fn assign_customer_to_route(
        &self,
        customer_id: &str,
        route_id: &str,
    ) -> RoutingResult<AssignmentOutcome> {
        let customer = self
            .store
            .get_customer(customer_id)
            .await?
            .ok_or_else(|| RoutingError::CustomerNotFound(customer_id.to_string()))?;
        let mut target = self
            .store
            .get_route(route_id)
            .await?
            .ok_or_else(|| RoutingError::RouteNotFound(route_id.to_string()))?;

        if target.contains_stop_for(customer_id) {
            debug!(
                customer_id = %customer_id,
                route_id = %route_id,
                "Customer already has a stop on target route, nothing to do"
            );
            return Ok(AssignmentOutcome::AlreadyAssigned);
        }

        let prior_route_id = customer.route_id.clone();
        if let Some(current) = prior_route_id.as_deref() {
            if current != route_id {
                if !customer.allows_multi_route() {
                    return Err(RoutingError::ConflictingAssignment {
                        customer_id: customer_id.to_string(),
                        current_route_id: current.to_string(),
                    });
                }

                // twice-weekly 封顶：统计当前持有该客户站点的线路数
                let memberships = self
                    .store
                    .list_routes()
                    .await?
                    .iter()
                    .filter(|r| r.contains_stop_for(customer_id))
                    .count();
                if memberships >= self.config.max_routes_per_twice_weekly {
                    warn!(
                        customer_id = %customer_id,
                        route_id = %route_id,
                        memberships,
                        cap = self.config.max_routes_per_twice_weekly,
                        "Twice-weekly customer is at its route cap"
                    );
                    return Err(RoutingError::ConflictingAssignment {
                        customer_id: customer_id.to_string(),
                        current_route_id: current.to_string(),
                    });
                }
            }
        }

        // 同一线路的漂移修复：route_id 已指向目标但站点丢失时，先清掉
        // 可能残留的旧站点再重新追加
        if prior_route_id.as_deref() == Some(route_id) {
            target.stops.retain(|s| s.customer_id != customer_id);
        }

        let position = target.stops.len() as u32 + 1;
        target.stops.push(Stop::for_customer(&customer, position));
        // 站点集合每次变化后 position 必须回到 1..N 的稠密排列
        target.stops = stop_sequencer::renumber(target.stops);

        let mut updated = customer;
        updated.previous_route_id = prior_route_id;
        updated.route_id = Some(route_id.to_string());
        updated.needs_route_ordering = false;

        let mut batch = WriteBatch::new();
        batch.set_route(target);
        batch.set_customer(updated);
        self.commit(batch).await?;

        info!(
            customer_id = %customer_id,
            route_id = %route_id,
            "Customer assigned to route"
        );
        Ok(AssignmentOutcome::Assigned)
    }

    /// 把客户从线路上移除
    ///
    /// 站点被过滤掉并重编号，客户回到未指派状态。`needs_route_ordering`
    /// 显式置为 false：这是用户主动发起的移除，不需要再提示排序。
    pub async fn unassign_customer(&self, route_id: &str, customer_id: &str) -> RoutingResult<()> {
        let mut route = self
            .store
            .get_route(route_id)
            .await?
            .ok_or_else(|| RoutingError::RouteNotFound(route_id.to_string()))?;
        let mut customer = self
            .store
            .get_customer(customer_id)
            .await?
            .ok_or_else(|| RoutingError::CustomerNotFound(customer_id.to_string()))?;

        let before = route.stops.len();
        route.stops.retain(|s| s.customer_id != customer_id);
        if route.stops.len() == before {
            debug!(
                customer_id = %customer_id,
                route_id = %route_id,
                "No stop for customer on route, clearing customer side anyway"
            );
        }
        route.stops = stop_sequencer::renumber(route.stops);

        customer.route_id = None;
        customer.previous_route_id = Some(route_id.to_string());
        customer.needs_route_ordering = false;

        let mut batch = WriteBatch::new();
        batch.set_route(route);
        batch.set_customer(customer);
        self.commit(batch).await?;

        info!(
            customer_id = %customer_id,
            route_id = %route_id,
            "Customer unassigned from route"
        );
        Ok(())
    }

    /// 应用一次完整的站点重排（来自手工拖拽）
    ///
    /// `new_order` 必须是线路现有站点的一个排列，拖拽不改变成员。
    /// 手工排序视为对整条线路的确认，线路上所有客户的待排序标记一并清除，
    /// 而不只是被移动的那个。
    pub async fn reorder_stops(&self, route_id: &str, new_order: Vec<Stop>) -> RoutingResult<()> {
        let mut route = self
            .store
            .get_route(route_id)
            .await?
            .ok_or_else(|| RoutingError::RouteNotFound(route_id.to_string()))?;

        if !is_permutation(&route.stops, &new_order) {
            return Err(RoutingError::InvalidParameter(format!(
                "reorder for route {} must be a permutation of its current stops",
                route_id
            )));
        }

        route.stops = stop_sequencer::renumber(new_order);

        let mut batch = WriteBatch::new();
        for stop in &route.stops {
            if let Some(mut customer) = self.store.get_customer(&stop.customer_id).await? {
                if customer.needs_route_ordering {
                    customer.needs_route_ordering = false;
                    batch.set_customer(customer);
                }
            }
        }
        let stop_count = route.stops.len();
        batch.set_route(route);
        self.commit(batch).await?;

        info!(
            route_id = %route_id,
            stops = stop_count,
            "Route stops reordered"
        );
        Ok(())
    }

    /// 把员工指派到线路（或传 None 清除指派）
    ///
    /// 双侧更新：原技师的 `assigned_routes` 移除该线路，新技师加入，
    /// 线路的 `assigned_tech` 换成新技师的最新快照。重复指派同一员工
    /// 只会刷新快照。
    pub async fn assign_employee_to_route(
        &self,
        route_id: &str,
        employee_id: Option<&str>,
    ) -> RoutingResult<()> {
        let mut route = self
            .store
            .get_route(route_id)
            .await?
            .ok_or_else(|| RoutingError::RouteNotFound(route_id.to_string()))?;

        let mut batch = WriteBatch::new();

        if let Some(previous) = route.assigned_tech.as_ref() {
            if employee_id != Some(previous.id.as_str()) {
                match self.store.get_employee(&previous.id).await? {
                    Some(mut former) => {
                        former.remove_route(route_id);
                        batch.set_employee(former);
                    }
                    None => {
                        warn!(
                            employee_id = %previous.id,
                            route_id = %route_id,
                            "Former assigned tech no longer exists, skipping removal"
                        );
                    }
                }
            }
        }

        match employee_id {
            Some(id) => {
                let mut employee = self
                    .store
                    .get_employee(id)
                    .await?
                    .ok_or_else(|| RoutingError::EmployeeNotFound(id.to_string()))?;
                employee.add_route(route_id);
                route.assigned_tech = Some(AssignedTech::snapshot_of(&employee));
                batch.set_employee(employee);
            }
            None => {
                route.assigned_tech = None;
            }
        }

        batch.set_route(route);
        self.commit(batch).await?;

        info!(
            route_id = %route_id,
            employee_id = employee_id.unwrap_or("<none>"),
            "Route tech assignment updated"
        );
        Ok(())
    }

    /// 提交批量写；存储拒绝映射为 `AssignmentFailed`
    async fn commit(&self, batch: WriteBatch) -> RoutingResult<()> {
        debug!(writes = batch.len(), "Committing assignment batch");
        self.store.commit(batch).await.map_err(|e| match e {
            RoutingError::AssignmentFailed(_) => e,
            other => RoutingError::AssignmentFailed(other.to_string()),
        })
    }
}

/// 两个站点列表是否互为排列（按站点 ID 比较）
fn is_permutation(current: &[Stop], incoming: &[Stop]) -> bool {
    if current.len() != incoming.len() {
        return false;
    }
    let mut current_ids: Vec<&str> = current.iter().map(|s| s.id.as_str()).collect();
    let mut incoming_ids: Vec<&str> = incoming.iter().map(|s| s.id.as_str()).collect();
    current_ids.sort_unstable();
    incoming_ids.sort_unstable();
    current_ids == incoming_ids
}
