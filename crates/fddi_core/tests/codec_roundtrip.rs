use chrono::NaiveDate;
use fddi_core::{
    decode, encode, encode_pretty, Activity, Aspect, AspectInfo, DecodeError, EncodeError,
    ExtensionValue, Feature, Milestone, Note, Program, Progress, Project, RecordValidationError,
    Status, Subject,
};
use std::collections::BTreeMap;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample_program() -> Program {
    let mut feature = Feature::new("Record a new order");
    feature.seq = 1;
    feature.initials = Some("AB".to_string());
    feature.milestones = vec![
        Milestone {
            status: Some(Status::Complete),
            actual: Some(date(2024, 1, 9)),
            ..Milestone::planned(date(2024, 1, 8))
        },
        Milestone::planned(date(2024, 2, 1)),
    ];
    feature.remarks.push(Note {
        date: Some(date(2024, 1, 9)),
        ..Note::new("walkthrough done")
    });

    let mut activity = Activity::new("Take orders");
    activity.features.push(feature);

    let mut subject = Subject::new("Ordering");
    subject.prefix = Some("ORD".to_string());
    subject.activities.push(activity);

    let mut aspect = Aspect::new("Backend");
    aspect.info = Some(AspectInfo::standard());
    aspect.subjects.push(subject);
    aspect.progress = Some(Progress {
        status: Some(Status::Underway),
        ..Progress::with_completion(1)
    });

    let mut nested = BTreeMap::new();
    nested.insert("owner".to_string(), ExtensionValue::from("ops"));
    nested.insert("weight".to_string(), ExtensionValue::from(0.75));

    let mut project = Project::new("Alpha");
    project.aspects.push(aspect);
    project
        .extensions
        .insert("meta".to_string(), ExtensionValue::Map(nested));
    project
        .extensions
        .insert("flags".to_string(), ExtensionValue::from(vec![true, false]));
    project
        .extensions
        .insert("budget".to_string(), ExtensionValue::from(1200_i64));

    let mut child = Program::new("Child");
    child.id = Some("child-1".to_string());

    let mut program = Program::new("Root");
    program.programs.push(child);
    program.projects.push(project);
    program
}

#[test]
fn nested_program_survives_round_trip() {
    let program = sample_program();

    let text = encode(&program).unwrap();
    let decoded: Program = decode(&text).unwrap();

    assert_eq!(decoded, program);
}

#[test]
fn pretty_and_compact_forms_decode_to_the_same_record() {
    let program = sample_program();

    let pretty = encode_pretty(&program).unwrap();
    assert!(pretty.contains('\n'));

    let decoded: Program = decode(&pretty).unwrap();
    assert_eq!(decoded, program);
}

#[test]
fn encoding_is_deterministic() {
    let program = sample_program();
    assert_eq!(encode(&program).unwrap(), encode(&program.clone()).unwrap());
}

#[test]
fn integer_and_float_extensions_keep_their_kind() {
    let text = r#"{"name":"Alpha","extensions":{"count":3,"ratio":1.0,"none":null}}"#;
    let project: Project = decode(text).unwrap();

    assert_eq!(
        project.extensions.get("count"),
        Some(&ExtensionValue::Integer(3))
    );
    assert_eq!(
        project.extensions.get("ratio"),
        Some(&ExtensionValue::Float(1.0))
    );
    assert_eq!(project.extensions.get("none"), Some(&ExtensionValue::Null));
}

const FULL_PRECISION_FLOATS: [f64; 6] = [
    1.0715660391465826e-75,
    -1.603964615428183e143,
    0.1 + 0.2,
    f64::MIN_POSITIVE,
    f64::MAX,
    5e-324,
];

#[test]
fn full_precision_floats_round_trip_exactly() {
    let mut project = Project::new("Alpha");
    project.extensions.insert(
        "samples".to_string(),
        ExtensionValue::from(FULL_PRECISION_FLOATS.to_vec()),
    );

    let decoded: Project = decode(&encode(&project).unwrap()).unwrap();

    let Some(ExtensionValue::List(samples)) = decoded.extensions.get("samples") else {
        panic!("samples extension missing after decode");
    };
    let bits: Vec<u64> = samples
        .iter()
        .map(|sample| match sample {
            ExtensionValue::Float(value) => value.to_bits(),
            other => panic!("expected float, got {other:?}"),
        })
        .collect();
    let expected: Vec<u64> = FULL_PRECISION_FLOATS
        .iter()
        .map(|value| value.to_bits())
        .collect();
    assert_eq!(bits, expected);
    assert_eq!(decoded, project);
}

#[test]
fn absent_and_empty_collections_decode_equal() {
    let absent: Project = decode(r#"{"name":"Alpha"}"#).unwrap();
    let empty: Project = decode(r#"{"name":"Alpha","aspects":[],"extensions":{}}"#).unwrap();
    assert_eq!(absent, empty);
}

#[test]
fn malformed_text_is_a_syntax_error() {
    let err = decode::<Project>(r#"{"name": "Alpha""#).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
    assert!(err.is_syntax());
}

#[test]
fn missing_required_name_is_rejected() {
    let err = decode::<Project>(r#"{"aspects":[]}"#).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
    assert!(!err.is_syntax());
    assert!(err.to_string().contains("name"));
}

#[test]
fn wrong_field_type_is_rejected() {
    let err = decode::<Project>(r#"{"name":"Alpha","aspects":"none"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
}

#[test]
fn unknown_status_is_rejected() {
    let err = decode::<Progress>(r#"{"completion":5,"status":"NotStarted"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
}

#[test]
fn decoding_empty_project_name_fails() {
    let err = decode::<Project>(r#"{"name":""}"#).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidRecord(RecordValidationError::EmptyName { record: "project" })
    ));
}

#[test]
fn decoding_blank_aspect_name_inside_program_fails() {
    let text = r#"{"projects":[{"name":"Alpha","aspects":[{"name":"  "}]}]}"#;
    let err = decode::<Program>(text).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidRecord(RecordValidationError::EmptyName { record: "aspect" })
    ));
}

#[test]
fn encoding_empty_names_fails() {
    let err = encode(&Project::new("")).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::InvalidRecord(RecordValidationError::EmptyName { record: "project" })
    ));

    let err = encode(&Aspect::new("")).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::InvalidRecord(RecordValidationError::EmptyName { record: "aspect" })
    ));
}

#[test]
fn encoding_non_finite_extension_fails() {
    let mut program = Program::new("Root");
    program
        .extensions
        .insert("score".to_string(), ExtensionValue::Float(f64::NAN));

    let err = encode(&program).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::InvalidRecord(RecordValidationError::NonFiniteNumber { ref key }) if key == "score"
    ));
}

#[test]
fn out_of_range_completion_fails_to_decode() {
    let err = decode::<Project>(r#"{"name":"Alpha","progress":{"completion":150}}"#).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidRecord(RecordValidationError::CompletionOutOfRange { completion: 150 })
    ));
}
