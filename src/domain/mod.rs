// Domain layer: request/response models and the outbound notification port.

pub mod model;
pub mod ports;
