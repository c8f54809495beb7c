//! User API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! GET    /api/v1/users/filter?loginName=alice
//! POST   /api/v1/users
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, User};
use crate::inbound::http::state::AppState;
use crate::inbound::http::ApiResult;

/// Query parameters for the user filter endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterQuery {
    login_name: String,
}

pub(crate) fn created_response<T: serde::Serialize>(
    resource: &str,
    id: Option<i64>,
    body: &T,
) -> ApiResult<HttpResponse> {
    // The upsert contract guarantees an identifier on success.
    let id = id.ok_or_else(|| Error::internal(format!("persisted {resource} carries no id")))?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/{resource}/{id}")))
        .json(body))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users as a JSON array", body = [User])
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<AppState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users().get_all().await?))
}

/// Fetch a user by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user with the provided id", body = User),
        (status = 404, description = "No user with the provided id", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    Ok(web::Json(state.users().get_by_id(path.into_inner()).await?))
}

/// Fetch a user by login name.
#[utoipa::path(
    get,
    path = "/api/v1/users/filter",
    params(("loginName" = String, Query, description = "Login name to match exactly")),
    responses(
        (status = 200, description = "The user with the provided login name", body = User),
        (status = 404, description = "No user with the provided login name", body = Error)
    ),
    tags = ["users"],
    operation_id = "filterUsers"
)]
#[get("/users/filter")]
pub async fn filter_users(
    state: web::Data<AppState>,
    query: web::Query<UserFilterQuery>,
) -> ApiResult<web::Json<User>> {
    Ok(web::Json(
        state.users().get_by_login_name(&query.login_name).await?,
    ))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = User,
    responses(
        (status = 201, description = "The new user", body = User),
        (status = 400, description = "Validation failed", body = Error),
        (status = 409, description = "Login name already in use", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<User>,
) -> ApiResult<HttpResponse> {
    let created = state.users().upsert(payload.into_inner()).await?;
    created_response("users", created.id(), &created)
}

/// Update an existing user by identifier.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = User,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "Ids in path and body do not match", body = Error),
        (status = 404, description = "No user with the provided id", body = Error),
        (status = 409, description = "Login name already in use", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<User>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let user = payload.into_inner();
    if user.id() != Some(id) {
        return Err(
            Error::invalid_request("user id in path and body do not match").with_details(json!({
                "pathId": id,
                "bodyId": user.id(),
            })),
        );
    }
    Ok(web::Json(state.users().upsert(user).await?))
}

/// Delete a user by identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "The deletion request was acknowledged")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.users().delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockOsmNodeSource;
    use crate::domain::{Pos, PosCatalogueService, UserDirectoryService};
    use crate::outbound::memory::InMemoryStore;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let user_store = Arc::new(InMemoryStore::<User>::new());
        let pos_store = Arc::new(InMemoryStore::<Pos>::new());
        AppState::new(
            Arc::new(UserDirectoryService::new(user_store)),
            Arc::new(PosCatalogueService::new(
                pos_store,
                Arc::new(MockOsmNodeSource::new()),
            )),
        )
    }

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(test_state())).service(
            web::scope("/api/v1")
                .service(list_users)
                .service(filter_users)
                .service(get_user)
                .service(create_user)
                .service(update_user)
                .service(delete_user),
        )
    }

    async fn create_alice(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Value {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(serde_json::json!({ "id": null, "loginName": "alice" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        actix_test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn create_assigns_id_and_location_header() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(serde_json::json!({ "id": null, "loginName": "alice" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let location = res
            .headers()
            .get("location")
            .expect("location header")
            .to_str()
            .expect("ascii header")
            .to_owned();
        let body: Value = actix_test::read_body_json(res).await;
        let id = body["id"].as_i64().expect("assigned id");
        assert_eq!(location, format!("/api/v1/users/{id}"));
        assert_eq!(body["loginName"], "alice");
    }

    #[actix_web::test]
    async fn duplicate_login_name_answers_conflict() {
        let app = actix_test::init_service(test_app()).await;
        create_alice(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(serde_json::json!({ "id": null, "loginName": "alice" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["details"]["field"], "loginName");
    }

    #[actix_web::test]
    async fn update_with_mismatched_ids_is_rejected() {
        let app = actix_test::init_service(test_app()).await;
        create_alice(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/users/1")
                .set_json(serde_json::json!({ "id": 2, "loginName": "alice2" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn update_replaces_fields_and_keeps_id() {
        let app = actix_test::init_service(test_app()).await;
        let created = create_alice(&app).await;
        let id = created["id"].as_i64().expect("assigned id");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/users/{id}"))
                .set_json(serde_json::json!({ "id": id, "loginName": "alice2" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["id"].as_i64(), Some(id));
        assert_eq!(body["loginName"], "alice2");
    }

    #[actix_web::test]
    async fn update_of_unknown_id_answers_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/users/99")
                .set_json(serde_json::json!({ "id": 99, "loginName": "bob" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn filter_finds_users_by_login_name() {
        let app = actix_test::init_service(test_app()).await;
        create_alice(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/filter?loginName=alice")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["loginName"], "alice");
    }

    #[actix_web::test]
    async fn delete_acknowledges_but_keeps_the_user() {
        let app = actix_test::init_service(test_app()).await;
        let created = create_alice(&app).await;
        let id = created["id"].as_i64().expect("assigned id");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/users/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        // Deletion is a no-op stub; the record survives.
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/users/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn invalid_payload_answers_bad_request() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(serde_json::json!({ "id": null, "loginName": "NOT VALID" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
