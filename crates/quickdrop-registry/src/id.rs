//! Random link identifier generation.

use quickdrop_core::models::LinkId;
use rand::{distr::Alphanumeric, Rng};

/// Generate a random identifier for a share link.
///
/// Eight characters drawn uniformly from `[A-Za-z0-9]`. This function makes
/// no uniqueness guarantee; the registry retries against live records on the
/// (negligible) chance of a collision.
pub fn generate_link_id() -> LinkId {
    let raw: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(LinkId::LEN)
        .map(char::from)
        .collect();
    LinkId::new(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_fixed_length_alphanumeric() {
        for _ in 0..100 {
            let id = generate_link_id();
            assert_eq!(id.as_str().len(), LinkId::LEN);
            assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generated_ids_vary() {
        let ids: std::collections::HashSet<String> = (0..64)
            .map(|_| generate_link_id().as_str().to_string())
            .collect();
        // 64 draws from a 62^8 space; a repeat means the generator is broken
        assert_eq!(ids.len(), 64);
    }
}
