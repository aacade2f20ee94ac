use resguard_types::Action;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a governance decision.
///
/// Identity fields:
/// - policy name
/// - resource id
/// - action
///
/// The Executor uses this to recognise the same decision across cycles.
pub fn decision_fingerprint(policy: &str, resource_id: &str, action: Action) -> String {
    let canonical = [policy, resource_id, action.as_str()].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
