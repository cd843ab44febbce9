//! Stable identifiers for hierarchy nodes.
//!
//! Records are created without ids; callers that need stable references
//! (linking, external sync) stamp them once with `assign_missing_ids`.

use super::aspect::Aspect;
use super::feature::Feature;
use super::program::Program;
use super::project::Project;
use super::subject::{Activity, Subject};
use uuid::Uuid;

/// Fills absent `id` fields with fresh UUID v4 strings.
pub trait AssignIds {
    /// Returns how many ids were assigned in this subtree.
    ///
    /// Existing ids are never replaced.
    fn assign_missing_ids(&mut self) -> usize;
}

impl AssignIds for Feature {
    fn assign_missing_ids(&mut self) -> usize {
        fill_id(&mut self.id)
    }
}

impl AssignIds for Activity {
    fn assign_missing_ids(&mut self) -> usize {
        fill_id(&mut self.id) + assign_all(&mut self.features)
    }
}

impl AssignIds for Subject {
    fn assign_missing_ids(&mut self) -> usize {
        fill_id(&mut self.id) + assign_all(&mut self.activities)
    }
}

impl AssignIds for Aspect {
    fn assign_missing_ids(&mut self) -> usize {
        fill_id(&mut self.id) + assign_all(&mut self.subjects)
    }
}

impl AssignIds for Project {
    fn assign_missing_ids(&mut self) -> usize {
        fill_id(&mut self.id) + assign_all(&mut self.aspects)
    }
}

impl AssignIds for Program {
    fn assign_missing_ids(&mut self) -> usize {
        fill_id(&mut self.id) + assign_all(&mut self.programs) + assign_all(&mut self.projects)
    }
}

fn assign_all<T: AssignIds>(nodes: &mut [T]) -> usize {
    nodes.iter_mut().map(AssignIds::assign_missing_ids).sum()
}

fn fill_id(id: &mut Option<String>) -> usize {
    if id.is_some() {
        return 0;
    }
    *id = Some(Uuid::new_v4().to_string());
    1
}
