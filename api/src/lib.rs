// Module layout (Clean Architecture style)
// - bootstrap: configuration, store selection and startup wiring
// - infrastructure: PostgreSQL/in-memory stores and token signing
// - presentation: HTTP handlers and routing
// - application: ports, access policy and use cases
// - domain: core records and their rules

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
