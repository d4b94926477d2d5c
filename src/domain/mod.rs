// Domain layer: record and filter models plus the ports the core and adapters meet at.

pub mod model;
pub mod ports;
