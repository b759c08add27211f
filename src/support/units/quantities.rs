use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, P1, Z0},
};

/// Temperature gradient, K/m in SI.
pub type TemperatureGradient = Quantity<ISQ<N1, Z0, Z0, Z0, P1, Z0, Z0>, SI<f64>, f64>;
