// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::commands::testing::TestContext;

fn by_ids(ids: &[i64]) -> TargetArgs {
    TargetArgs {
        results: ids.to_vec(),
        filter: vec![],
    }
}

fn by_filter(terms: &[&str]) -> TargetArgs {
    TargetArgs {
        results: vec![],
        filter: terms.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_resolve_requires_a_target() {
    let err = resolve_target(&TargetArgs::default()).unwrap_err();
    assert!(matches!(err, Error::NoTarget));
}

#[test]
fn test_attach_and_detach_by_ids() {
    let ctx = TestContext::new();
    let issue = ctx.add_issue("https://github.com/canonical/checkbox/issues/9");
    ctx.add_result(1, "snap", "FAILED");
    ctx.add_result(2, "snap", "FAILED");

    attach_impl(&ctx.db, issue.id, &by_ids(&[1, 2]), None).unwrap();
    let attachments = ctx.db.attachments_for_issue(issue.id).unwrap();
    assert_eq!(attachments.len(), 2);
    assert!(attachments.iter().all(|a| a.rule_id.is_none()));

    detach_impl(&ctx.db, issue.id, &by_ids(&[2])).unwrap();
    assert_eq!(ctx.db.attachments_for_issue(issue.id).unwrap().len(), 1);
}

#[test]
fn test_attach_by_filter_records_rule() {
    let ctx = TestContext::new();
    let issue = ctx.add_issue("https://github.com/canonical/checkbox/issues/9");
    let rule = ctx
        .db
        .create_rule(issue.id, &triage_core::RuleCriteria::default(), false)
        .unwrap();
    ctx.add_result(1, "snap", "FAILED");
    ctx.add_result(2, "deb", "FAILED");
    ctx.add_result(3, "snap", "PASSED");

    attach_impl(
        &ctx.db,
        issue.id,
        &by_filter(&["family=snap", "status=failed"]),
        Some(rule.id),
    )
    .unwrap();

    let attachments = ctx.db.attachments_for_issue(issue.id).unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].test_result_id, 1);
    assert_eq!(attachments[0].rule_id, Some(rule.id));
}

#[test]
fn test_attach_with_missing_rule_fails() {
    let ctx = TestContext::new();
    let issue = ctx.add_issue("https://github.com/canonical/checkbox/issues/9");
    ctx.add_result(1, "snap", "FAILED");
    let err = attach_impl(&ctx.db, issue.id, &by_ids(&[1]), Some(42)).unwrap_err();
    assert!(matches!(err, Error::Core(triage_core::Error::RuleNotFound(42))));
}

#[test]
fn test_detach_with_bad_filter_term() {
    let ctx = TestContext::new();
    let issue = ctx.add_issue("https://github.com/canonical/checkbox/issues/9");
    let err = detach_impl(&ctx.db, issue.id, &by_filter(&["flavour=x"])).unwrap_err();
    assert!(matches!(err, Error::UnknownField(..)));
}
