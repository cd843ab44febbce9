//! FDDI record model: programs, projects, aspects and everything below them.
//!
//! # Responsibility
//! - Define the plain nested value types of the planning hierarchy.
//! - Expose structural validation and progress roll-up over record trees.
//!
//! # Invariants
//! - Parents exclusively own their children; there are no back-references.
//! - Project, aspect, subject, activity and feature names are non-empty.
//! - Optional fields, empty lists and empty extension bags are omitted on the
//!   wire, so "absent" and "empty" decode to the same value.
//!
//! # Hierarchy
//! Program → (Program | Project) → Aspect → Subject → Activity → Feature →
//! Milestone. An aspect's [`AspectInfo`] declares the milestone definitions
//! every nested feature is measured against.

pub mod aspect;
pub mod extension;
pub mod feature;
pub mod identity;
pub mod milestone;
pub mod program;
pub mod progress;
pub mod project;
pub mod rollup;
pub mod subject;
pub mod validation;

pub use aspect::{Aspect, AspectInfo};
pub use extension::{ExtensionValue, Extensions};
pub use feature::Feature;
pub use identity::AssignIds;
pub use milestone::{Milestone, MilestoneInfo, Note};
pub use program::Program;
pub use progress::{Kpi, Progress, Status};
pub use project::Project;
pub use rollup::FeatureTree;
pub use subject::{Activity, Subject};
pub use validation::{RecordValidationError, Validate};
