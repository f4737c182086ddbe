use crate::domain::model::Stop;

/// 指派客户到线路命令
#[derive(Debug, Clone)]
pub struct AssignCustomerToRouteCommand {
    pub customer_id: String,
    pub route_id: String,
}

/// 从线路移除客户命令
#[derive(Debug, Clone)]
pub struct UnassignCustomerCommand {
    pub route_id: String,
    pub customer_id: String,
}

/// 站点重排命令（携带拖拽后的完整新顺序）
#[derive(Debug, Clone)]
pub struct ReorderStopsCommand {
    pub route_id: String,
    pub new_order: Vec<Stop>,
}

/// 指派技师到线路命令（employee_id 为 None 表示清除指派）
#[derive(Debug, Clone)]
pub struct AssignEmployeeToRouteCommand {
    pub route_id: String,
    pub employee_id: Option<String>,
}
