use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
///
/// Paths are added by the routers in [`crate::routes`].
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Users", description = "Registration and profile"),
        (name = "Courses", description = "Catalog browsing and course authoring"),
        (name = "Reviews", description = "Comments and star ratings from buyers"),
        (name = "Purchases", description = "Purchase ledger"),
        (name = "Administration", description = "Course approval and moderation"),
    ),
    info(
        title = "Course Marketplace API",
        version = "1.0.0",
        description = "Course marketplace with approval, purchases and ratings",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
