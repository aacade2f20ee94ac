use resguard_types::{Action, Resource};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::policy::Policy;

/// One (policy, resource) pair whose condition held.
#[derive(Clone, Copy, Debug)]
pub struct PolicyMatch<'a> {
    pub policy: &'a Policy,
    pub resource: &'a Resource,
    pub action: Action,
    pub approval_required: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PolicyEvalResult<'a> {
    /// Policy-major, then resource order.
    pub matches: Vec<PolicyMatch<'a>>,
    pub total_policies: usize,
    pub total_resources: usize,
}

impl<'a> PolicyEvalResult<'a> {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn actions_by_type(&self) -> BTreeMap<Action, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.matches {
            *counts.entry(m.action).or_insert(0) += 1;
        }
        counts
    }

    pub fn requires_approval(&self) -> Vec<PolicyMatch<'a>> {
        self.matches
            .iter()
            .filter(|m| m.approval_required)
            .copied()
            .collect()
    }

    pub fn auto_executable(&self) -> Vec<PolicyMatch<'a>> {
        self.matches
            .iter()
            .filter(|m| !m.approval_required)
            .copied()
            .collect()
    }

    /// Consecutive runs of matches that share a policy, in load order.
    pub fn by_policy(&self) -> Vec<(&'a Policy, &[PolicyMatch<'a>])> {
        self.matches
            .chunk_by(|a, b| std::ptr::eq(a.policy, b.policy))
            .filter_map(|run| run.first().map(|m| (m.policy, run)))
            .collect()
    }
}

/// The active, ordered policy set.
///
/// Append-only apart from [`PolicyEngine::clear`].
#[derive(Clone, Debug, Default)]
pub struct PolicyEngine {
    policies: Vec<Policy>,
}

impl PolicyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an enabled policy. Disabled policies are dropped; returns whether it was kept.
    pub fn add(&mut self, policy: Policy) -> bool {
        if !policy.enabled {
            debug!(policy = %policy.name, "skipping disabled policy");
            return false;
        }
        self.policies.push(policy);
        true
    }

    /// Returns the number of policies kept.
    pub fn extend(&mut self, policies: impl IntoIterator<Item = Policy>) -> usize {
        policies
            .into_iter()
            .map(|p| self.add(p))
            .filter(|kept| *kept)
            .count()
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn clear(&mut self) {
        self.policies.clear();
    }

    pub fn evaluate<'a>(&'a self, resources: &'a [Resource]) -> PolicyEvalResult<'a> {
        let mut result = PolicyEvalResult {
            matches: Vec::new(),
            total_policies: self.policies.len(),
            total_resources: resources.len(),
        };

        for policy in &self.policies {
            for resource in resources {
                if !policy.matches(resource) {
                    continue;
                }
                debug!(
                    policy = %policy.name,
                    resource = %resource.name,
                    action = %policy.action,
                    "policy matched"
                );
                result.matches.push(PolicyMatch {
                    policy,
                    resource,
                    action: policy.action,
                    approval_required: policy.approval_required,
                });
            }
        }

        info!(
            matches = result.matches.len(),
            policies = result.total_policies,
            resources = result.total_resources,
            "policy evaluation complete"
        );
        result
    }
}
