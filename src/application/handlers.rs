//! 路线命令处理器
//!
//! UI 边界调用的四个操作在这里落地：记录日志、委托给指派协调器。
//! 所有操作都是全有或全无，失败时底层状态保证不变，UI 以内联错误
//! 横幅渲染类型化失败。

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::commands::{
    AssignCustomerToRouteCommand, AssignEmployeeToRouteCommand, ReorderStopsCommand,
    UnassignCustomerCommand,
};
use crate::domain::service::assignment::{AssignmentCoordinator, AssignmentOutcome};
use crate::error::RoutingResult;

/// 路线命令处理器
pub struct RoutingCommandHandler {
    coordinator: Arc<AssignmentCoordinator>,
}

impl RoutingCommandHandler {
    pub fn new(coordinator: Arc<AssignmentCoordinator>) -> Self {
        Self { coordinator }
    }

    /// 处理指派客户命令
    pub async fn handle_assign_customer(
        &self,
        command: AssignCustomerToRouteCommand,
    ) -> RoutingResult<AssignmentOutcome> {
        debug!(
            customer_id = %command.customer_id,
            route_id = %command.route_id,
            "Handling assign customer command"
        );

        let outcome = self
            .coordinator
            .assign_customer_to_route(&command.customer_id, &command.route_id)
            .await?;

        info!(
            customer_id = %command.customer_id,
            route_id = %command.route_id,
            outcome = ?outcome,
            "Assign customer command completed"
        );
        Ok(outcome)
    }

    /// 处理移除客户命令
    pub async fn handle_unassign_customer(
        &self,
        command: UnassignCustomerCommand,
    ) -> RoutingResult<()> {
        debug!(
            customer_id = %command.customer_id,
            route_id = %command.route_id,
            "Handling unassign customer command"
        );

        self.coordinator
            .unassign_customer(&command.route_id, &command.customer_id)
            .await?;

        info!(customer_id = %command.customer_id, "Unassign customer command completed");
        Ok(())
    }

    /// 处理站点重排命令
    pub async fn handle_reorder_stops(&self, command: ReorderStopsCommand) -> RoutingResult<()> {
        debug!(
            route_id = %command.route_id,
            stops = command.new_order.len(),
            "Handling reorder stops command"
        );

        self.coordinator
            .reorder_stops(&command.route_id, command.new_order)
            .await?;

        info!(route_id = %command.route_id, "Reorder stops command completed");
        Ok(())
    }

    /// 处理指派技师命令
    pub async fn handle_assign_employee(
        &self,
        command: AssignEmployeeToRouteCommand,
    ) -> RoutingResult<()> {
        debug!(
            route_id = %command.route_id,
            employee_id = command.employee_id.as_deref().unwrap_or("<none>"),
            "Handling assign employee command"
        );

        self.coordinator
            .assign_employee_to_route(&command.route_id, command.employee_id.as_deref())
            .await?;

        info!(route_id = %command.route_id, "Assign employee command completed");
        Ok(())
    }
}
