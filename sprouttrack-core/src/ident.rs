use uuid::Uuid;

/// Generates a session-unique identifier with a readable prefix,
/// e.g. `child_67e55044...`.
pub fn uid(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_has_prefix() {
        let id = uid("child");
        assert!(id.starts_with("child_"));
        assert!(id.len() > "child_".len());
    }

    #[test]
    fn test_uid_is_unique() {
        let a = uid("m");
        let b = uid("m");
        assert_ne!(a, b);
    }
}
