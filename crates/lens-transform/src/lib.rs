//! Transformation and profiling engine.
//!
//! Takes a parsed [`lens_model::Dataset`] plus the caller's column-to-role
//! mappings and derives one of:
//!
//! - a forest of [`lens_model::HierarchyNode`]s ([`build_hierarchy`])
//! - one [`lens_model::TabularProfile`] per column ([`profile_dataset`])
//! - a node/edge graph ([`build_network`])
//!
//! Every entry point is a synchronous, pure function of its inputs. Missing
//! required roles are the only errors; irregular data degrades to defaults
//! and is reported as [`lens_model::QualityIssue`]s.

pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod inference;
pub mod network;
pub mod options;
pub mod profile;
pub mod quality;
pub mod resolve;
pub mod validate;

pub use engine::{Derived, transform, transform_kind};
pub use error::{Result, TransformError};
pub use hierarchy::{build_hierarchy, flatten, hierarchy_stats};
pub use inference::{infer_type, parse_date};
pub use network::{DEFAULT_EDGE_WEIGHT, NodeDegree, build_network, network_stats, node_degrees};
pub use options::ProfileOptions;
pub use profile::{numeric_stats, profile_dataset};
pub use quality::{ColumnCounts, QualityReport, ScoreBreakdown, score_quality};
pub use resolve::{HierarchyMapping, MappedColumn, NetworkMapping};
pub use validate::{MappingReport, validate_mappings};
