//! Causal workflow components.
//!
//! Each component follows the same contract: extract named inputs, load the
//! dataset, delegate the substantive work to an agent, persist the run log
//! through the artifact store, and return a JSON payload.

pub mod discovery;
pub mod graph_discovery;
pub mod inference;
pub mod matrix;
pub mod registry;
pub mod sem;

pub use discovery::CausalDiscoveryComponent;
pub use graph_discovery::GraphDiscoveryComponent;
pub use inference::CausalInferenceComponent;
pub use matrix::GraphMatrixComponent;
pub use registry::DefaultComponentRegistry;
pub use sem::SemRefinementComponent;
