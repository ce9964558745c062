mod handlers;
mod types;

pub use handlers::list_plants;
pub use types::{PlantSummary, PlantsResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::__path_list_plants;
