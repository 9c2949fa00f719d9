//! Utility functions

/// Mask the local part of an email address for log output.
///
/// The address comes from the upstream profile response, so this must not
/// panic on odd input: empty local parts and multi-byte characters are
/// handled by walking chars rather than slicing bytes.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let shown = if local.chars().count() <= 2 { 1 } else { 2 };
            let prefix: String = local.chars().take(shown).collect();
            format!("{}***@{}", prefix, domain)
        }
        None => "***".to_string(),
    }
}
