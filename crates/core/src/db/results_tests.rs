// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::rule::RuleCriteria;
use crate::test_result::{Family, TestResultStatus};
use std::collections::BTreeSet;

fn view(id: i64, execution: i64, family: Family) -> TestResultView {
    TestResultView {
        id,
        test_execution_id: execution,
        test_plan_id: 1,
        artefact_build_id: 2,
        environment_id: 3,
        environment_name: "rpi4".into(),
        family,
        test_case_name: format!("case-{id}"),
        template_id: Some("tpl".into()),
        status: TestResultStatus::Failed,
        metadata: vec![
            MetadataEntry::new("os", "noble"),
            MetadataEntry::new("hw", "pi"),
        ],
    }
}

#[test]
fn record_and_get_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let original = view(1, 10, Family::Snap);

    assert!(db.record_test_result(&original).unwrap());
    let loaded = db.get_test_result(1).unwrap();

    assert_eq!(loaded.family, Family::Snap);
    assert_eq!(loaded.template_id.as_deref(), Some("tpl"));
    // Metadata comes back sorted
    assert_eq!(
        loaded.metadata,
        vec![
            MetadataEntry::new("hw", "pi"),
            MetadataEntry::new("os", "noble"),
        ]
    );
}

#[test]
fn record_twice_is_noop() {
    let db = Database::open_in_memory().unwrap();
    let v = view(1, 10, Family::Snap);
    assert!(db.record_test_result(&v).unwrap());
    assert!(!db.record_test_result(&v).unwrap());
}

#[test]
fn get_missing_result() {
    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.get_test_result(5),
        Err(Error::TestResultNotFound(5))
    ));
}

#[test]
fn metadata_is_shared_per_execution() {
    let db = Database::open_in_memory().unwrap();
    db.record_test_result(&view(1, 10, Family::Snap)).unwrap();
    let mut sibling = view(2, 10, Family::Snap);
    sibling.metadata = vec![MetadataEntry::new("hw", "cm4")];
    db.record_test_result(&sibling).unwrap();

    let hw: Vec<String> = db
        .get_test_result(1)
        .unwrap()
        .metadata
        .into_iter()
        .filter(|m| m.category == "hw")
        .map(|m| m.value)
        .collect();
    assert_eq!(hw, vec!["cm4", "pi"]);
}

#[test]
fn filter_selects_matching_results() {
    let db = Database::open_in_memory().unwrap();
    db.record_test_result(&view(1, 10, Family::Snap)).unwrap();
    db.record_test_result(&view(2, 11, Family::Deb)).unwrap();
    db.record_test_result(&view(3, 12, Family::Snap)).unwrap();

    let filter = TestResultFilter {
        criteria: RuleCriteria {
            families: BTreeSet::from([Family::Snap]),
            ..Default::default()
        },
        ..Default::default()
    };
    let ids: Vec<i64> = db
        .filter_test_results(&filter)
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn empty_filter_is_validation_error() {
    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.filter_test_results(&TestResultFilter::default()),
        Err(Error::Validation(_))
    ));
}
