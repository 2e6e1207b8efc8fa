use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub message: String }

#[derive(ToSchema)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    /// `customer` (default) or `seller`.
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct SignInRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct ItemRequest { pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct ItemPatchRequest { pub name: Option<String>, pub price: Option<f64> }

#[derive(ToSchema)]
pub struct RatingRequest { pub rating: f64 }

#[derive(ToSchema)]
pub struct CommentRequest { pub comment: String }

#[derive(ToSchema)]
pub struct StatusRequest { pub status: String }

#[derive(ToSchema)]
pub struct ItemSummaryDoc {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub seller_name: String,
    pub avg_rating: f64,
}

#[derive(ToSchema)]
pub struct ItemCommentDoc { pub comment: String, pub email: String }

#[derive(ToSchema)]
pub struct ItemDetailDoc {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub seller_name: String,
    pub avg_rating: f64,
    pub comments: Vec<ItemCommentDoc>,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::sign_up,
        crate::routes::auth::sign_in,
        crate::routes::auth::logout,
        crate::routes::items::list,
        crate::routes::items::get,
        crate::routes::items::create,
        crate::routes::items::update,
        crate::routes::items::delete,
        crate::routes::items::rate,
        crate::routes::items::comment,
        crate::routes::items::purchase,
        crate::routes::orders::set_status,
        crate::routes::users::me,
        crate::routes::users::my_orders,
        crate::routes::users::cancel_order,
    ),
    components(
        schemas(
            HealthResponse,
            SignUpRequest,
            SignInRequest,
            ItemRequest,
            ItemPatchRequest,
            RatingRequest,
            CommentRequest,
            StatusRequest,
            ItemSummaryDoc,
            ItemCommentDoc,
            ItemDetailDoc,
            UserDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "items"),
        (name = "orders"),
        (name = "users")
    )
)]
pub struct ApiDoc;
