//! OpenAPI documentation assembled from the annotated handlers.

use utoipa::OpenApi;

use crate::domain::{CampusType, Error, ErrorCode, Pos, Position, User};

/// Aggregated OpenAPI document for the REST surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Coffee API",
        description = "Points of sale for coffee on campus, plus the users who rate them."
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::filter_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::pos::list_pos,
        crate::inbound::http::pos::get_pos,
        crate::inbound::http::pos::filter_pos,
        crate::inbound::http::pos::create_pos,
        crate::inbound::http::pos::update_pos,
        crate::inbound::http::pos::delete_pos,
        crate::inbound::http::pos::import_pos_from_osm,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, Pos, Position, CampusType, Error, ErrorCode)),
    tags(
        (name = "users", description = "User accounts"),
        (name = "pos", description = "Points of sale"),
        (name = "health", description = "Service probes")
    )
)]
pub struct ApiDoc;
