/// 线路建议查询
#[derive(Debug, Clone)]
pub struct SuggestRoutesQuery {
    pub customer_id: String,
}
