// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use triage_core::db::Attachment;
use triage_core::sync::{BatchResult, SyncResult, SyncStats};
use triage_core::{AttachmentRule, Issue, RerunRequest, RuleCriteria, TriageOutcome};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn title_or_placeholder(title: &str) -> &str {
    if title.is_empty() {
        "(not synced yet)"
    } else {
        title
    }
}

pub fn format_issue_line(issue: &Issue) -> String {
    format!(
        "- [{}] ({}) {}: {}",
        issue.source,
        issue.status,
        issue.id,
        title_or_placeholder(&issue.title)
    )
}

/// Format issue details for `issue show`.
pub fn format_issue_details(
    issue: &Issue,
    rules: &[AttachmentRule],
    attachments: &[Attachment],
) -> String {
    let mut output = Vec::new();

    output.push(format!("[{}] {}", issue.source, issue.id));
    output.push(format!("URL: {}", issue.url()));
    output.push(format!("Title: {}", title_or_placeholder(&issue.title)));
    output.push(format!("Status: {}", issue.status));
    if !issue.labels.is_empty() {
        output.push(format!("Labels: {}", issue.labels.join(", ")));
    }
    output.push(format!(
        "Auto-rerun: {}",
        if issue.auto_rerun_enabled { "on" } else { "off" }
    ));
    output.push(format!(
        "Last synced: {}",
        issue
            .last_synced_at
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| "never".to_string())
    ));
    if let Some(error) = &issue.last_sync_error {
        output.push(format!("Last sync error: {error}"));
    }
    output.push(format!(
        "Updated: {}",
        issue.updated_at.format(TIME_FORMAT)
    ));

    if !rules.is_empty() {
        output.push(String::new());
        output.push("Rules:".to_string());
        for rule in rules {
            output.push(format!("  {}", format_rule_line(rule)));
        }
    }

    if !attachments.is_empty() {
        output.push(String::new());
        output.push(format!("Attached to {} test result(s):", attachments.len()));
        for attachment in attachments {
            let via = match attachment.rule_id {
                Some(rule_id) => format!(" (rule {rule_id})"),
                None => String::new(),
            };
            output.push(format!("  - {}{}", attachment.test_result_id, via));
        }
    }

    output.join("\n")
}

/// Compact criteria rendering, e.g. `family=snap status=FAILED meta:arch=amd64,arm64`.
pub fn format_criteria(criteria: &RuleCriteria) -> String {
    if criteria.is_wildcard() {
        return "(matches every result)".to_string();
    }

    let mut parts = Vec::new();
    let mut push = |field: &str, values: Vec<String>| {
        if !values.is_empty() {
            parts.push(format!("{field}={}", values.join(",")));
        }
    };
    push(
        "family",
        criteria.families.iter().map(|f| f.to_string()).collect(),
    );
    push(
        "environment",
        criteria.environment_names.iter().cloned().collect(),
    );
    push("test_case", criteria.test_case_names.iter().cloned().collect());
    push("template", criteria.template_ids.iter().cloned().collect());
    push(
        "status",
        criteria
            .test_result_statuses
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    for (category, values) in &criteria.execution_metadata {
        push(
            &format!("meta:{category}"),
            values.iter().cloned().collect(),
        );
    }
    parts.join(" ")
}

pub fn format_rule_line(rule: &AttachmentRule) -> String {
    format!(
        "rule {} -> issue {}{}: {}",
        rule.id,
        rule.issue_id,
        if rule.enabled { "" } else { " [disabled]" },
        format_criteria(&rule.criteria)
    )
}

pub fn format_outcome(outcome: &TriageOutcome) -> Vec<String> {
    let mut lines = vec![format!(
        "test result {}: {} rule(s) matched, {} new attachment(s){}",
        outcome.test_result_id,
        outcome.matched_rules.len(),
        outcome.attachments_created,
        if outcome.recorded { "" } else { " (already recorded)" }
    )];
    if !outcome.skipped_rules.is_empty() {
        let ids: Vec<String> = outcome.skipped_rules.iter().map(i64::to_string).collect();
        lines.push(format!(
            "  skipped rule(s) with missing issue: {}",
            ids.join(", ")
        ));
    }
    if let Some(key) = &outcome.rerun_requested {
        lines.push(format!(
            "  rerun requested: plan {} build {} environment {}",
            key.test_plan_id, key.artefact_build_id, key.environment_id
        ));
    }
    lines
}

pub fn format_rerun_line(request: &RerunRequest) -> String {
    format!(
        "- plan {} build {} environment {} (requested {})",
        request.key.test_plan_id,
        request.key.artefact_build_id,
        request.key.environment_id,
        request.created_at.format(TIME_FORMAT)
    )
}

pub fn format_sync_result(result: &SyncResult) -> String {
    if !result.success {
        return format!(
            "issue {}: failed: {}",
            result.issue_id,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    let mut changed = Vec::new();
    if result.title_updated {
        changed.push("title");
    }
    if result.status_updated {
        changed.push("status");
    }
    if result.labels_updated {
        changed.push("labels");
    }
    if changed.is_empty() {
        format!("issue {}: up to date", result.issue_id)
    } else {
        format!("issue {}: updated {}", result.issue_id, changed.join(", "))
    }
}

pub fn format_batch(label: &str, batch: &BatchResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{label}: synced {} issue(s): {} succeeded, {} failed, {} updated ({:.1}% success)",
        batch.total,
        batch.successful,
        batch.failed,
        batch.updated,
        batch.success_rate()
    )];
    lines.extend(
        batch
            .results
            .iter()
            .filter(|r| !r.success || r.changed())
            .map(|r| format!("  {}", format_sync_result(r))),
    );
    lines
}

pub fn format_stats(stats: &SyncStats) -> Vec<String> {
    vec![
        format!("open:            {}", stats.open),
        format!("recently closed: {}", stats.recently_closed),
        format!("old closed:      {}", stats.old_closed),
        format!("never synced:    {}", stats.never_synced),
        format!("total:           {}", stats.total),
    ]
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
