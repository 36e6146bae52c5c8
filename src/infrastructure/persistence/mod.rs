pub mod dataset_store;
pub mod model_store;

pub use dataset_store::DatasetStore;
pub use model_store::{ModelBundle, ModelStore};
