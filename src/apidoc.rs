use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Poll Adapter",
        version = "0.1.0",
        description = "WAHA callback backend. Logs inbound events and answers chat messages with a registration poll."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local dev")
    ),
    tags(
        (name = "various", description = "Liveness and local callback endpoints")
    ),
    // Handlers (paths)
    paths(
        crate::routes::misc::ping,
        crate::routes::misc::local_callback,
    ),
    // Schemas used in requests/responses
    components(
        schemas(
            crate::models::webhook::CallbackEvent,
            crate::models::common::ApiResponse,
            crate::models::common::ErrorMessage
        )
    )
)]
pub struct ApiDoc;
