// Domain layer: wire/data models and ports (interfaces) for the external
// collaborators. No I/O here.

pub mod model;
pub mod ports;
