// Domain layer: protocol models and the ports the resolver talks through.

pub mod model;
pub mod ports;
