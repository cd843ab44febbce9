//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fddi_core` linkage.
//! - Optionally exercise the record store against a real database file.
//! - Keep output deterministic for quick local sanity checks.

use fddi_core::{
    encode, Activity, Aspect, AspectInfo, Feature, FeatureTree, Program, Project, RecordStore,
    SqliteRecordStore, StoreOptions, Subject,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("fddi_core ping={}", fddi_core::ping());
    println!("fddi_core version={}", fddi_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return Ok(());
    };

    let mut store = SqliteRecordStore::open(&db_path, &StoreOptions::default())?;
    store.register_table::<Program>()?;
    store.register_table::<Project>()?;
    store.register_table::<Aspect>()?;

    let mut program = sample_program();
    program.assign_feature_seqs();
    program.recalculate_progress();
    store.persist(&program)?;

    let programs = store.fetch_all::<Program>()?;
    println!("fddi_core programs={}", programs.len());
    if let Some(last) = programs.last() {
        println!("fddi_core last_program={}", encode(last)?);
    }
    Ok(())
}

fn sample_program() -> Program {
    let mut activity = Activity::new("Take orders");
    activity.features.push(Feature::new("Record a new order"));

    let mut subject = Subject::new("Ordering");
    subject.activities.push(activity);

    let mut aspect = Aspect::new("Backend");
    aspect.info = Some(AspectInfo::standard());
    aspect.subjects.push(subject);

    let mut project = Project::new("Smoke");
    project.aspects.push(aspect);

    let mut program = Program::new("Smoke program");
    program.projects.push(project);
    program
}
