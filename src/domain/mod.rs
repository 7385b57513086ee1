// Domain layer: plain data and the capability ports every script is handed.

pub mod model;
pub mod ports;
