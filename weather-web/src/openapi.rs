use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::CitySuggestion;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::suggest_cities,
    ),
    components(schemas(CitySuggestion)),
    tags(
        (name = "suggestions", description = "City name autocomplete"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
