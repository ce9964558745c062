use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

/// Plant directory row with its zone count
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct PlantSummary {
    pub plant_id: i32,
    pub name: String,
    pub media_type: Option<String>,
    pub description: Option<String>,
    pub zone_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlantsResponse {
    pub plants: Vec<PlantSummary>,
    pub count: usize,
}
