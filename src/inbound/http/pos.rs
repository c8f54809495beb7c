//! Point-of-sale API handlers.
//!
//! ```text
//! GET    /api/v1/pos
//! GET    /api/v1/pos/{id}
//! GET    /api/v1/pos/filter?name=Library%20Espresso
//! POST   /api/v1/pos
//! PUT    /api/v1/pos/{id}
//! DELETE /api/v1/pos/{id}
//! POST   /api/v1/pos/import/osm/{node_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{CampusType, Error, Pos};
use crate::inbound::http::state::AppState;
use crate::inbound::http::users::created_response;
use crate::inbound::http::ApiResult;

/// Query parameters for the POS filter endpoint.
#[derive(Debug, Deserialize)]
pub struct PosFilterQuery {
    name: String,
}

/// List all points of sale.
#[utoipa::path(
    get,
    path = "/api/v1/pos",
    responses(
        (status = 200, description = "All points of sale as a JSON array", body = [Pos])
    ),
    tags = ["pos"],
    operation_id = "listPos"
)]
#[get("/pos")]
pub async fn list_pos(state: web::Data<AppState>) -> ApiResult<web::Json<Vec<Pos>>> {
    Ok(web::Json(state.pos().get_all().await?))
}

/// Fetch a point of sale by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/pos/{id}",
    params(("id" = i64, Path, description = "POS identifier")),
    responses(
        (status = 200, description = "The POS with the provided id", body = Pos),
        (status = 404, description = "No POS with the provided id", body = Error)
    ),
    tags = ["pos"],
    operation_id = "getPosById"
)]
#[get("/pos/{id}")]
pub async fn get_pos(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Pos>> {
    Ok(web::Json(state.pos().get_by_id(path.into_inner()).await?))
}

/// Fetch a point of sale by display name.
#[utoipa::path(
    get,
    path = "/api/v1/pos/filter",
    params(("name" = String, Query, description = "Display name to match exactly")),
    responses(
        (status = 200, description = "The POS with the provided name", body = Pos),
        (status = 404, description = "No POS with the provided name", body = Error)
    ),
    tags = ["pos"],
    operation_id = "filterPos"
)]
#[get("/pos/filter")]
pub async fn filter_pos(
    state: web::Data<AppState>,
    query: web::Query<PosFilterQuery>,
) -> ApiResult<web::Json<Pos>> {
    Ok(web::Json(state.pos().get_by_name(&query.name).await?))
}

/// Create a new point of sale.
#[utoipa::path(
    post,
    path = "/api/v1/pos",
    request_body = Pos,
    responses(
        (status = 201, description = "The new POS", body = Pos),
        (status = 400, description = "Validation failed", body = Error),
        (status = 409, description = "Name already in use", body = Error)
    ),
    tags = ["pos"],
    operation_id = "createPos"
)]
#[post("/pos")]
pub async fn create_pos(
    state: web::Data<AppState>,
    payload: web::Json<Pos>,
) -> ApiResult<HttpResponse> {
    let created = state.pos().upsert(payload.into_inner()).await?;
    created_response("pos", created.id(), &created)
}

/// Update an existing point of sale by identifier.
#[utoipa::path(
    put,
    path = "/api/v1/pos/{id}",
    params(("id" = i64, Path, description = "POS identifier")),
    request_body = Pos,
    responses(
        (status = 200, description = "The updated POS", body = Pos),
        (status = 400, description = "Ids in path and body do not match", body = Error),
        (status = 404, description = "No POS with the provided id", body = Error),
        (status = 409, description = "Name already in use", body = Error)
    ),
    tags = ["pos"],
    operation_id = "updatePos"
)]
#[put("/pos/{id}")]
pub async fn update_pos(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<Pos>,
) -> ApiResult<web::Json<Pos>> {
    let id = path.into_inner();
    let pos = payload.into_inner();
    if pos.id() != Some(id) {
        return Err(
            Error::invalid_request("pos id in path and body do not match").with_details(json!({
                "pathId": id,
                "bodyId": pos.id(),
            })),
        );
    }
    Ok(web::Json(state.pos().upsert(pos).await?))
}

/// Delete a point of sale by identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/pos/{id}",
    params(("id" = i64, Path, description = "POS identifier")),
    responses(
        (status = 204, description = "The POS was deleted"),
        (status = 404, description = "No POS with the provided id", body = Error)
    ),
    tags = ["pos"],
    operation_id = "deletePos"
)]
#[delete("/pos/{id}")]
pub async fn delete_pos(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.pos().delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Import a point of sale from an OpenStreetMap node.
///
/// The request body carries the campus type to assign, as a JSON string
/// (for example `"NORTH"`). The node's `name` tag, coordinates, and
/// `description` tag supply the rest of the record.
#[utoipa::path(
    post,
    path = "/api/v1/pos/import/osm/{node_id}",
    params(("node_id" = i64, Path, description = "OpenStreetMap node identifier")),
    request_body = CampusType,
    responses(
        (status = 201, description = "The imported POS", body = Pos),
        (status = 400, description = "The node is unusable as a POS", body = Error),
        (status = 404, description = "No such OSM node", body = Error),
        (status = 409, description = "Name already in use", body = Error),
        (status = 503, description = "The OSM API could not be reached", body = Error)
    ),
    tags = ["pos"],
    operation_id = "importPosFromOsmNode"
)]
#[post("/pos/import/osm/{node_id}")]
pub async fn import_pos_from_osm(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<CampusType>,
) -> ApiResult<HttpResponse> {
    let imported = state
        .pos()
        .import_from_osm_node(path.into_inner(), payload.into_inner())
        .await?;
    created_response("pos", imported.id(), &imported)
}
