use chrono::NaiveDate;
use fddi_core::{
    decode, encode, Activity, AssignIds, Aspect, AspectInfo, Feature, FeatureTree, Milestone,
    Program, Progress, Project, Status, Subject,
};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn done(planned: NaiveDate) -> Milestone {
    Milestone {
        status: Some(Status::Complete),
        ..Milestone::planned(planned)
    }
}

fn open(planned: NaiveDate) -> Milestone {
    Milestone::planned(planned)
}

/// Feature with `completed` leading milestones done out of the six standard ones.
fn feature_with_progress(name: &str, completed: usize) -> Feature {
    let mut feature = Feature::new(name);
    feature.milestones = (0..6)
        .map(|index| {
            let planned = date(2024, 1, 1 + index as u32);
            if index < completed {
                done(planned)
            } else {
                open(planned)
            }
        })
        .collect();
    feature
}

/// Aspect whose single activity holds features at 100, 41 and 0 percent.
fn backend_aspect() -> Aspect {
    let mut activity = Activity::new("Take orders");
    activity.features = vec![
        feature_with_progress("Record order", 6),
        feature_with_progress("Cancel order", 2),
        feature_with_progress("Refund order", 0),
    ];
    let mut subject = Subject::new("Ordering");
    subject.activities.push(activity);
    let mut aspect = Aspect::new("Backend");
    aspect.info = Some(AspectInfo::standard());
    aspect.subjects.push(subject);
    aspect
}

#[test]
fn feature_completion_sums_completed_milestone_efforts() {
    let info = AspectInfo::standard().milestone_info;

    assert_eq!(feature_with_progress("a", 0).completion(&info), 0);
    assert_eq!(feature_with_progress("a", 1).completion(&info), 1);
    assert_eq!(feature_with_progress("a", 2).completion(&info), 41);
    assert_eq!(feature_with_progress("a", 4).completion(&info), 89);
    assert_eq!(feature_with_progress("a", 6).completion(&info), 100);
}

#[test]
fn milestones_are_matched_by_position() {
    let info = AspectInfo::standard().milestone_info;
    let mut feature = Feature::new("Skips design");
    feature.milestones = vec![
        open(date(2024, 1, 1)),
        done(date(2024, 1, 2)),
        open(date(2024, 1, 3)),
        done(date(2024, 1, 4)),
    ];

    assert_eq!(feature.completion(&info), 85);
    assert_eq!(feature.completion(&[]), 0);
}

#[test]
fn container_completion_is_integer_mean_of_children() {
    let aspect = backend_aspect();
    assert_eq!(aspect.completion(), 47);

    let mut project = Project::new("Alpha");
    project.aspects.push(aspect);
    project.aspects.push(Aspect::new("Empty"));
    assert_eq!(project.completion(), 23);

    let mut program = Program::new("Root");
    program.programs.push(Program::new("Nothing yet"));
    program.projects.push(project);
    assert_eq!(program.completion(), 11);
}

#[test]
fn empty_containers_have_zero_completion() {
    assert_eq!(Program::unnamed().completion(), 0);
    assert_eq!(Project::new("Alpha").completion(), 0);
    assert_eq!(Aspect::new("Backend").completion(), 0);
}

#[test]
fn aspect_without_info_earns_nothing() {
    let mut aspect = backend_aspect();
    aspect.info = None;
    assert_eq!(aspect.completion(), 0);
}

#[test]
fn recalculate_stores_completion_on_every_level() {
    let mut project = Project::new("Alpha");
    project.aspects.push(backend_aspect());
    project.progress = Some(Progress {
        status: Some(Status::Underway),
        ..Progress::with_completion(99)
    });

    assert_eq!(project.recalculate_progress(), 47);

    let progress = project.progress.as_ref().unwrap();
    assert_eq!(progress.completion, 47);
    assert_eq!(progress.status, Some(Status::Underway));

    let aspect = &project.aspects[0];
    assert_eq!(aspect.progress.as_ref().unwrap().completion, 47);
    let subject = &aspect.subjects[0];
    assert_eq!(subject.progress.as_ref().unwrap().completion, 47);
    let activity = &subject.activities[0];
    assert_eq!(activity.progress.as_ref().unwrap().completion, 47);
    let completions: Vec<u8> = activity
        .features
        .iter()
        .map(|feature| feature.progress.as_ref().unwrap().completion)
        .collect();
    assert_eq!(completions, [100, 41, 0]);
}

#[test]
fn target_date_is_latest_planned_milestone() {
    let mut feature = Feature::new("Record order");
    assert_eq!(feature.target_date(), None);

    feature.milestones = vec![
        open(date(2024, 3, 1)),
        Milestone::default(),
        open(date(2024, 2, 1)),
    ];
    assert_eq!(feature.target_date(), Some(date(2024, 3, 1)));

    let aspect = backend_aspect();
    assert_eq!(aspect.target_date(), Some(date(2024, 1, 6)));
}

#[test]
fn feature_is_late_while_a_past_milestone_is_open() {
    let mut feature = Feature::new("Record order");
    feature.milestones = vec![done(date(2024, 1, 1)), open(date(2024, 1, 10))];

    assert!(!feature.is_late(date(2024, 1, 10)));
    assert!(feature.is_late(date(2024, 1, 11)));

    feature.milestones[1].status = Some(Status::Complete);
    assert!(!feature.is_late(date(2024, 1, 11)));
}

#[test]
fn tree_is_late_after_target_unless_complete() {
    let aspect = backend_aspect();
    assert!(!aspect.is_late(date(2024, 1, 6)));
    assert!(aspect.is_late(date(2024, 1, 7)));

    let mut finished = Aspect::new("Finished");
    finished.info = Some(AspectInfo::standard());
    let mut activity = Activity::new("All done");
    activity.features.push(feature_with_progress("Done", 6));
    let mut subject = Subject::new("Done");
    subject.activities.push(activity);
    finished.subjects.push(subject);
    assert!(!finished.is_late(date(2030, 1, 1)));
}

#[test]
fn unassigned_features_are_numbered_after_highest_seq() {
    let mut aspect = backend_aspect();
    aspect.subjects[0].activities[0].features[1].seq = 5;

    assert_eq!(aspect.next_feature_seq(), Some(6));
    assert_eq!(aspect.assign_feature_seqs(), 2);

    let seqs: Vec<u32> = aspect.features().iter().map(|feature| feature.seq).collect();
    assert_eq!(seqs, [6, 5, 7]);
    assert_eq!(aspect.assign_feature_seqs(), 0);
}

#[test]
fn numbering_stops_at_the_end_of_the_seq_range() {
    let mut aspect = backend_aspect();
    aspect.subjects[0].activities[0].features[0].seq = u32::MAX - 1;

    assert_eq!(aspect.next_feature_seq(), Some(u32::MAX));
    assert_eq!(aspect.assign_feature_seqs(), 1);

    let seqs: Vec<u32> = aspect.features().iter().map(|feature| feature.seq).collect();
    assert_eq!(seqs, [u32::MAX - 1, u32::MAX, 0]);
    assert_eq!(aspect.next_feature_seq(), None);
    assert_eq!(aspect.assign_feature_seqs(), 0);
}

#[test]
fn max_seq_survives_decoding_without_breaking_numbering() {
    let mut aspect = backend_aspect();
    aspect.subjects[0].activities[0].features[2].seq = u32::MAX;

    let decoded: Aspect = decode(&encode(&aspect).unwrap()).unwrap();

    assert_eq!(decoded.next_feature_seq(), None);
}

#[test]
fn program_numbers_features_across_sub_programs_first() {
    let mut child = Program::new("Child");
    let mut child_project = Project::new("Beta");
    child_project.aspects.push(backend_aspect());
    child.projects.push(child_project);

    let mut program = Program::new("Root");
    let mut project = Project::new("Alpha");
    project.aspects.push(backend_aspect());
    program.projects.push(project);
    program.programs.push(child);

    assert_eq!(program.assign_feature_seqs(), 6);
    assert_eq!(program.programs[0].features()[0].seq, 1);
    assert_eq!(program.projects[0].features()[0].seq, 4);
    assert_eq!(program.next_feature_seq(), Some(7));
}

#[test]
fn missing_ids_are_filled_once_with_uuids() {
    let mut program = Program::new("Root");
    let mut project = Project::new("Alpha");
    project.id = Some("alpha".to_string());
    project.aspects.push(backend_aspect());
    program.projects.push(project);

    // program + aspect + subject + activity + three features
    assert_eq!(program.assign_missing_ids(), 7);
    assert_eq!(program.assign_missing_ids(), 0);

    assert_eq!(program.projects[0].id.as_deref(), Some("alpha"));
    let feature_id = program.features()[0].id.clone().unwrap();
    assert!(Uuid::parse_str(&feature_id).is_ok());
    assert_ne!(program.id, program.projects[0].aspects[0].id);
}
