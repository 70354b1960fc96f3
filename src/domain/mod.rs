// Domain layer: core models and ports (interfaces), plus pure task/username helpers.

pub mod model;
pub mod ports;
pub mod services;
