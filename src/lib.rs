// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: DB adapters
// - presentation: HTTP handlers and routing
// - application: ports, use cases and domain services
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
