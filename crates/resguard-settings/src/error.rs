use resguard_domain::PolicyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no 'policies' key")]
    MissingPolicies,

    #[error("policy '{policy}': unknown action '{value}' (expected alert|delete|tag|stop|archive)")]
    UnknownAction { policy: String, value: String },

    #[error("policy '{policy}': unknown severity '{value}' (expected info|low|medium|high|critical)")]
    UnknownSeverity { policy: String, value: String },

    #[error("policy '{policy}': {source}")]
    InvalidResourceType {
        policy: String,
        #[source]
        source: PolicyError,
    },

    #[error("unknown profile '{0}' (expected standard|cautious)")]
    UnknownProfile(String),

    #[error("unknown log level '{0}' (expected trace|debug|info|warn|error)")]
    UnknownLogLevel(String),

    #[error("unknown destructive action '{0}' (expected alert|delete|tag|stop|archive)")]
    UnknownDestructiveAction(String),
}
