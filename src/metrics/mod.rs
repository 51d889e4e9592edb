//! Metrics Sampling Module
//!
//! Extracts the four metric categories (navigation, resources, rendering,
//! network) from an instrumentation source.
//!
//! # Components
//!
//! - [`model`]: Sample records and `CollectionFailure`
//! - [`heuristics`]: URL naming, resource kinds, API detection
//! - [`sampler`]: The `Sampler` itself

pub mod heuristics;
pub mod model;
pub mod sampler;

pub use heuristics::ResourceKind;
pub use model::{
    AllMetrics, Collected, CollectionFailure, LargestResource, NavigationSample, NetworkSample,
    RenderingSample, ResourceSample, SlowestRequest,
};
pub use sampler::Sampler;
