pub mod authorizer_handlers;
pub mod health_handlers;
pub mod url_handlers;
