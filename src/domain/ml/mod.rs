pub mod encoder;
pub mod ensemble;
pub mod feature_registry;
pub mod model_package;
pub mod regressor;
pub mod scaler;
