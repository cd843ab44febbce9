//! Progress, target-date and lateness roll-up over a record tree.
//!
//! # Responsibility
//! - Derive feature completion from completed milestones.
//! - Aggregate completion bottom-up through every container level.
//! - Derive target dates and lateness from planned milestone dates.
//!
//! # Invariants
//! - A feature earns the effort of milestone definition `n` only when its
//!   `n`-th milestone is complete; extra milestones on either side are ignored.
//! - Container completion is the integer mean of its children, `0` when empty.
//! - Computed completions never exceed 100.

use super::aspect::Aspect;
use super::feature::Feature;
use super::milestone::MilestoneInfo;
use super::program::Program;
use super::progress::Progress;
use super::project::Project;
use super::subject::{Activity, Subject};
use chrono::NaiveDate;

impl Feature {
    /// Completion earned from this feature's completed milestones.
    pub fn completion(&self, milestone_info: &[MilestoneInfo]) -> u8 {
        let earned: u32 = self
            .milestones
            .iter()
            .zip(milestone_info)
            .filter(|(milestone, _)| milestone.is_complete())
            .map(|(_, info)| u32::from(info.effort))
            .sum();
        clamp_percent(earned)
    }

    /// Stores and returns [`Feature::completion`].
    pub fn recalculate_progress(&mut self, milestone_info: &[MilestoneInfo]) -> u8 {
        let completion = self.completion(milestone_info);
        store_completion(&mut self.progress, completion);
        completion
    }

    /// Latest planned milestone date.
    pub fn target_date(&self) -> Option<NaiveDate> {
        self.milestones
            .iter()
            .filter_map(|milestone| milestone.planned)
            .max()
    }

    /// A feature is late when a milestone planned before `today` is not complete.
    pub fn is_late(&self, today: NaiveDate) -> bool {
        self.milestones.iter().any(|milestone| {
            milestone.planned.is_some_and(|planned| planned < today) && !milestone.is_complete()
        })
    }
}

impl Activity {
    pub fn completion(&self, milestone_info: &[MilestoneInfo]) -> u8 {
        mean_completion(
            self.features
                .iter()
                .map(|feature| feature.completion(milestone_info)),
        )
    }

    pub fn recalculate_progress(&mut self, milestone_info: &[MilestoneInfo]) -> u8 {
        let completion = mean_completion(
            self.features
                .iter_mut()
                .map(|feature| feature.recalculate_progress(milestone_info)),
        );
        store_completion(&mut self.progress, completion);
        completion
    }
}

impl Subject {
    pub fn completion(&self, milestone_info: &[MilestoneInfo]) -> u8 {
        mean_completion(
            self.activities
                .iter()
                .map(|activity| activity.completion(milestone_info)),
        )
    }

    pub fn recalculate_progress(&mut self, milestone_info: &[MilestoneInfo]) -> u8 {
        let completion = mean_completion(
            self.activities
                .iter_mut()
                .map(|activity| activity.recalculate_progress(milestone_info)),
        );
        store_completion(&mut self.progress, completion);
        completion
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.activities
            .iter()
            .flat_map(|activity| activity.features.iter())
    }

    pub fn features_mut(&mut self) -> impl Iterator<Item = &mut Feature> {
        self.activities
            .iter_mut()
            .flat_map(|activity| activity.features.iter_mut())
    }
}

/// Roll-up operations shared by aspects, projects and programs.
pub trait FeatureTree {
    /// Completion computed from the current milestones, without mutation.
    fn completion(&self) -> u8;

    /// Recomputes and stores `Progress::completion` on every node, bottom-up.
    ///
    /// Other `Progress` fields already present are kept.
    fn recalculate_progress(&mut self) -> u8;

    /// All features in the tree, in document order.
    fn features(&self) -> Vec<&Feature>;

    fn features_mut(&mut self) -> Vec<&mut Feature>;

    /// Latest target date among the tree's features.
    fn target_date(&self) -> Option<NaiveDate> {
        self.features()
            .into_iter()
            .filter_map(Feature::target_date)
            .max()
    }

    /// Late when the target date has passed and work is not complete.
    fn is_late(&self, today: NaiveDate) -> bool {
        self.target_date().is_some_and(|target| target < today) && self.completion() != 100
    }

    /// Sequence number one past the highest assigned in the tree.
    ///
    /// `None` once `u32::MAX` is taken; numbering never wraps back to the
    /// unassigned value `0`.
    fn next_feature_seq(&self) -> Option<u32> {
        self.features()
            .iter()
            .map(|feature| feature.seq)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    /// Numbers every unassigned feature (`seq == 0`) in document order.
    ///
    /// Returns how many features were numbered. Features past the end of the
    /// `u32` range stay unassigned.
    fn assign_feature_seqs(&mut self) -> usize {
        let Some(mut next) = self.next_feature_seq() else {
            return 0;
        };
        let mut assigned = 0;
        for feature in self.features_mut() {
            if feature.seq != 0 {
                continue;
            }
            feature.seq = next;
            assigned += 1;
            match next.checked_add(1) {
                Some(following) => next = following,
                None => break,
            }
        }
        assigned
    }
}

impl FeatureTree for Aspect {
    fn completion(&self) -> u8 {
        let milestone_info = self.milestone_info();
        mean_completion(
            self.subjects
                .iter()
                .map(|subject| subject.completion(milestone_info)),
        )
    }

    fn recalculate_progress(&mut self) -> u8 {
        let milestone_info = match &self.info {
            Some(info) => info.milestone_info.as_slice(),
            None => &[],
        };
        let completion = mean_completion(
            self.subjects
                .iter_mut()
                .map(|subject| subject.recalculate_progress(milestone_info)),
        );
        store_completion(&mut self.progress, completion);
        completion
    }

    fn features(&self) -> Vec<&Feature> {
        self.subjects.iter().flat_map(Subject::features).collect()
    }

    fn features_mut(&mut self) -> Vec<&mut Feature> {
        self.subjects
            .iter_mut()
            .flat_map(Subject::features_mut)
            .collect()
    }
}

impl FeatureTree for Project {
    fn completion(&self) -> u8 {
        mean_completion(self.aspects.iter().map(FeatureTree::completion))
    }

    fn recalculate_progress(&mut self) -> u8 {
        let completion = mean_completion(
            self.aspects
                .iter_mut()
                .map(FeatureTree::recalculate_progress),
        );
        store_completion(&mut self.progress, completion);
        completion
    }

    fn features(&self) -> Vec<&Feature> {
        self.aspects
            .iter()
            .flat_map(FeatureTree::features)
            .collect()
    }

    fn features_mut(&mut self) -> Vec<&mut Feature> {
        self.aspects
            .iter_mut()
            .flat_map(FeatureTree::features_mut)
            .collect()
    }
}

impl FeatureTree for Program {
    /// Children are the sub-programs followed by the projects.
    fn completion(&self) -> u8 {
        let programs = self.programs.iter().map(FeatureTree::completion);
        let projects = self.projects.iter().map(FeatureTree::completion);
        mean_completion(programs.chain(projects))
    }

    fn recalculate_progress(&mut self) -> u8 {
        let programs = self
            .programs
            .iter_mut()
            .map(FeatureTree::recalculate_progress);
        let projects = self
            .projects
            .iter_mut()
            .map(FeatureTree::recalculate_progress);
        let completion = mean_completion(programs.chain(projects));
        store_completion(&mut self.progress, completion);
        completion
    }

    fn features(&self) -> Vec<&Feature> {
        let nested = self.programs.iter().flat_map(FeatureTree::features);
        let own = self.projects.iter().flat_map(FeatureTree::features);
        nested.chain(own).collect()
    }

    fn features_mut(&mut self) -> Vec<&mut Feature> {
        let nested = self
            .programs
            .iter_mut()
            .flat_map(FeatureTree::features_mut);
        let own = self
            .projects
            .iter_mut()
            .flat_map(FeatureTree::features_mut);
        nested.chain(own).collect()
    }
}

fn mean_completion(completions: impl Iterator<Item = u8>) -> u8 {
    let (sum, count) = completions.fold((0_u32, 0_u32), |(sum, count), completion| {
        (sum + u32::from(completion), count + 1)
    });
    if count == 0 {
        return 0;
    }
    clamp_percent(sum / count)
}

fn clamp_percent(value: u32) -> u8 {
    u8::try_from(value.min(100)).unwrap_or(100)
}

fn store_completion(progress: &mut Option<Progress>, completion: u8) {
    progress.get_or_insert_with(Progress::default).completion = completion;
}
