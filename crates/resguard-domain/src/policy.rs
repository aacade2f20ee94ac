use globset::{Glob, GlobMatcher};
use resguard_types::{Action, Resource, Severity};
use std::fmt;
use thiserror::Error;

use crate::condition::Condition;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid resource_type pattern '{pattern}': {source}")]
    InvalidResourceType {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Which resources a policy applies to.
#[derive(Clone, Debug)]
pub enum ResourceTypeMatcher {
    /// `all` or `*`.
    Any,
    /// Matched against both `"{provider}_{resource_type}"` and the bare `resource_type`.
    Pattern { raw: String, matcher: GlobMatcher },
}

impl ResourceTypeMatcher {
    pub fn parse(pattern: &str) -> Result<Self, PolicyError> {
        if pattern == "all" || pattern == "*" {
            return Ok(ResourceTypeMatcher::Any);
        }
        let glob = Glob::new(pattern).map_err(|source| PolicyError::InvalidResourceType {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(ResourceTypeMatcher::Pattern {
            raw: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResourceTypeMatcher::Any => "all",
            ResourceTypeMatcher::Pattern { raw, .. } => raw,
        }
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            ResourceTypeMatcher::Any => true,
            ResourceTypeMatcher::Pattern { matcher, .. } => {
                matcher.is_match(resource.composite_type()) || matcher.is_match(&resource.resource_type)
            }
        }
    }
}

impl fmt::Display for ResourceTypeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded governance rule. Immutable once built.
#[derive(Clone, Debug)]
pub struct Policy {
    pub name: String,
    pub resource_type: ResourceTypeMatcher,
    pub condition: Condition,
    pub action: Action,
    pub approval_required: bool,
    /// Cron expression, carried through for the scheduler. Not interpreted here.
    pub schedule: Option<String>,
    /// Notification endpoint, carried through. Not interpreted here.
    pub notification: Option<String>,
    pub description: String,
    pub severity: Severity,
    pub enabled: bool,
}

impl Policy {
    /// A policy with the rule-file defaults: alert, no approval, medium severity, enabled.
    pub fn new(
        name: impl Into<String>,
        resource_type: &str,
        condition: &str,
    ) -> Result<Self, PolicyError> {
        Ok(Self {
            name: name.into(),
            resource_type: ResourceTypeMatcher::parse(resource_type)?,
            condition: Condition::parse(condition),
            action: Action::Alert,
            approval_required: false,
            schedule: None,
            notification: None,
            description: String::new(),
            severity: Severity::Medium,
            enabled: true,
        })
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn with_approval(mut self, approval_required: bool) -> Self {
        self.approval_required = approval_required;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn applies_to(&self, resource: &Resource) -> bool {
        self.resource_type.matches(resource)
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        self.applies_to(resource) && self.condition.matches(resource)
    }
}
