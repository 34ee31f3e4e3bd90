// Domain layer: scan models and the ports (collaborator interfaces) the core depends on.

pub mod model;
pub mod ports;
