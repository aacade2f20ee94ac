//! Explain registry for actions and decision states.
//!
//! Maps stable identifiers to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for an action or decision state.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the identifier.
    pub title: &'static str,
    /// What it means and when it happens.
    pub description: &'static str,
    /// What to do about it.
    pub remediation: &'static str,
    /// Before/after policy examples.
    pub examples: ExamplePair,
}

/// Before and after rule-file snippets.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    pub before: &'static str,
    pub after: &'static str,
}

/// Look up an explanation by action or decision state id.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Actions
        ids::ACTION_ALERT => Some(explain_alert()),
        ids::ACTION_DELETE => Some(explain_delete()),
        ids::ACTION_TAG => Some(explain_tag()),
        ids::ACTION_STOP => Some(explain_stop()),
        ids::ACTION_ARCHIVE => Some(explain_archive()),

        // States
        ids::STATE_AUTO_EXECUTABLE => Some(explain_auto_executable()),
        ids::STATE_PENDING_APPROVAL => Some(explain_pending_approval()),
        ids::STATE_BLOCKED_BY_DEPENDENCY => Some(explain_blocked_by_dependency()),
        ids::STATE_EXECUTED => Some(explain_executed()),
        ids::STATE_REJECTED => Some(explain_rejected()),

        _ => None,
    }
}

/// List all known action ids.
pub fn all_actions() -> &'static [&'static str] {
    &[
        ids::ACTION_ALERT,
        ids::ACTION_DELETE,
        ids::ACTION_TAG,
        ids::ACTION_STOP,
        ids::ACTION_ARCHIVE,
    ]
}

/// List all known decision states.
pub fn all_states() -> &'static [&'static str] {
    &[
        ids::STATE_AUTO_EXECUTABLE,
        ids::STATE_PENDING_APPROVAL,
        ids::STATE_BLOCKED_BY_DEPENDENCY,
        ids::STATE_EXECUTED,
        ids::STATE_REJECTED,
    ]
}

// --- Actions ---

fn explain_alert() -> Explanation {
    Explanation {
        title: "Alert",
        description: "\
Reports the matched resource without touching it.

This is the default action when a policy omits `action`. Alerts are never destructive,
so the dependency graph is not consulted.",
        remediation: "\
Review the resource and its owner. If the waste is confirmed, switch the policy to a
stronger action such as `tag`, `stop` or `delete`.",
        examples: ExamplePair {
            before: r#"policies:
  - name: old-snapshots
    resource_type: "*snapshot*"
    condition: "age_days > 90""#,
            after: r#"policies:
  - name: old-snapshots
    resource_type: "*snapshot*"
    condition: "age_days > 90"
    action: alert"#,
        },
    }
}

fn explain_delete() -> Explanation {
    Explanation {
        title: "Delete",
        description: "\
Permanently removes the matched resource.

Delete is destructive. Before a delete decision can become auto-executable, the
dependency graph must report that nothing depends on the resource. A resource with
live dependents is reported as `blocked_by_dependency` instead.",
        remediation: "\
Prefer `approval_required: true` for delete policies until the condition has proven
itself. Keep conditions narrow (age plus cost) so that only clear waste matches.",
        examples: ExamplePair {
            before: r#"policies:
  - name: purge-disks
    resource_type: all
    condition: "orphaned == true"
    action: delete"#,
            after: r#"policies:
  - name: purge-disks
    resource_type: "azure_disk"
    condition: "orphaned == true AND age_days > 30 AND estimated_monthly_cost > 10"
    action: delete
    approval_required: true"#,
        },
    }
}

fn explain_tag() -> Explanation {
    Explanation {
        title: "Tag",
        description: "\
Marks the matched resource with governance tags so owners can find it.

Tagging is reversible and is not checked against the dependency graph.",
        remediation: "\
Use tagging as a first step before stop or delete, and give owners time to respond.",
        examples: ExamplePair {
            before: r#"policies:
  - name: idle-vms
    resource_type: "*vm*"
    condition: "idle == true"
    action: alert"#,
            after: r#"policies:
  - name: idle-vms
    resource_type: "*vm*"
    condition: "idle == true"
    action: tag"#,
        },
    }
}

fn explain_stop() -> Explanation {
    Explanation {
        title: "Stop",
        description: "\
Stops or deallocates a compute resource while keeping its configuration and disks.

Stop is not destructive under the `standard` profile. The `cautious` profile treats
it as destructive, so it is checked against the dependency graph first.",
        remediation: "\
Confirm the workload is idle. If other resources depend on it, select the `cautious`
profile or add `stop` to `gate.destructive_actions`.",
        examples: ExamplePair {
            before: r#"gate:
  destructive_actions: [delete, archive]"#,
            after: r#"gate:
  destructive_actions: [delete, archive, stop]"#,
        },
    }
}

fn explain_archive() -> Explanation {
    Explanation {
        title: "Archive",
        description: "\
Moves the resource's data to cold storage and removes the original.

Archive removes the original resource, so it is destructive and goes through the
dependency check like delete.",
        remediation: "\
Make sure the archive tier and retention are acceptable before enabling the policy.",
        examples: ExamplePair {
            before: r#"policies:
  - name: cold-buckets
    resource_type: "*bucket*"
    condition: "status == empty"
    action: delete"#,
            after: r#"policies:
  - name: cold-buckets
    resource_type: "*bucket*"
    condition: "age_days > 180"
    action: archive"#,
        },
    }
}

// --- Decision states ---

fn explain_auto_executable() -> Explanation {
    Explanation {
        title: "Auto-executable",
        description: "\
The match needs no approval, and either the action is not destructive or the
dependency graph reports nothing depends on the resource.

Note: ids unknown to the graph are treated as safe.",
        remediation: "\
The Executor may act on this decision. Run with `--dry-run` to review first.",
        examples: ExamplePair {
            before: r#"action: delete
approval_required: true"#,
            after: r#"action: delete
approval_required: false"#,
        },
    }
}

fn explain_pending_approval() -> Explanation {
    Explanation {
        title: "Pending approval",
        description: "\
The policy sets `approval_required: true`. The decision waits for a human.

The dependency verdict is still recorded. Approving a decision whose resource has
dependents moves it to `blocked_by_dependency`, not to auto-executable.",
        remediation: "\
Approve or reject the decision. Remove `approval_required` once the policy is trusted.",
        examples: ExamplePair {
            before: r#"action: delete"#,
            after: r#"action: delete
approval_required: true"#,
        },
    }
}

fn explain_blocked_by_dependency() -> Explanation {
    Explanation {
        title: "Blocked by dependency",
        description: "\
A destructive action matched a resource that other resources still depend on.

The decision is reported and never executed. The report lists the direct and
transitive dependents that would break.",
        remediation: "\
Remove or migrate the dependents first, or narrow the policy so it stops matching
the resource. Use `resguard impact <resource-id>` to inspect the cascade.",
        examples: ExamplePair {
            before: r#"condition: "age_days > 30""#,
            after: r#"condition: "age_days > 30 AND status == unattached""#,
        },
    }
}

fn explain_executed() -> Explanation {
    Explanation {
        title: "Executed",
        description: "\
The Executor carried out an auto-executable decision. Terminal state.",
        remediation: "Nothing to do.",
        examples: ExamplePair {
            before: "state: auto_executable",
            after: "state: executed",
        },
    }
}

fn explain_rejected() -> Explanation {
    Explanation {
        title: "Rejected",
        description: "\
A reviewer declined a pending decision. Terminal state.",
        remediation: "\
If the same resource keeps getting rejected, tighten the policy condition.",
        examples: ExamplePair {
            before: "state: pending_approval",
            after: "state: rejected",
        },
    }
}
