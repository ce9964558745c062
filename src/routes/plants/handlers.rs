use axum::{extract::State, Json};
use sea_orm::{ColumnTrait, EntityTrait, JoinType, QueryOrder, QuerySelect, RelationTrait};

use crate::common::AppState;
use crate::entity::{plants, zones};
use crate::error::ApiResult;

use super::types::{PlantSummary, PlantsResponse};

/// Plant directory with per-plant zone counts
#[utoipa::path(
    get,
    path = "/api/plants",
    responses(
        (status = 200, description = "Plants retrieved successfully", body = PlantsResponse),
        (status = 401, description = "Missing or invalid API key"),
    ),
    tag = "plants"
)]
pub async fn list_plants(State(state): State<AppState>) -> ApiResult<Json<PlantsResponse>> {
    if state.config.use_dummy_data {
        let plants_list = vec![PlantSummary {
            plant_id: 1,
            name: "Hidroponik".to_string(),
            media_type: Some("Hidroponik".to_string()),
            description: Some("Demo".to_string()),
            zone_count: 1,
        }];
        let count = plants_list.len();
        return Ok(Json(PlantsResponse {
            plants: plants_list,
            count,
        }));
    }

    let db = state.require_db()?;
    let plants_list = plants::Entity::find()
        .select_only()
        .column(plants::Column::PlantId)
        .column(plants::Column::Name)
        .column(plants::Column::MediaType)
        .column(plants::Column::Description)
        .column_as(zones::Column::ZoneId.count(), "zone_count")
        .join(JoinType::LeftJoin, plants::Relation::Zones.def())
        .group_by(plants::Column::PlantId)
        .group_by(plants::Column::Name)
        .group_by(plants::Column::MediaType)
        .group_by(plants::Column::Description)
        .order_by_asc(plants::Column::Name)
        .into_model::<PlantSummary>()
        .all(db)
        .await?;

    let count = plants_list.len();
    Ok(Json(PlantsResponse {
        plants: plants_list,
        count,
    }))
}
