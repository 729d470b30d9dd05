// Domain layer: order models and the ports the host framework implements.

pub mod model;
pub mod ports;
