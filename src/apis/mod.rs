pub mod domain;
pub mod group;
pub mod dataset;
pub mod attribute;

// Re-export all APIs
pub use domain::DomainApi;
pub use group::GroupApi;
pub use dataset::DatasetApi;
pub use attribute::{collection_for_id, AttributeApi};
