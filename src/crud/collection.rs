//! Collection name resolution.

/// Physical collection for a caller prefix: `prefix + "_" + base`.
pub fn resolve(prefix: &str, base: &str) -> String {
    let mut collection = String::with_capacity(prefix.len() + 1 + base.len());
    collection.push_str(prefix);
    collection.push('_');
    collection.push_str(base);
    collection
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_with_underscore() {
        assert_eq!(resolve("tenantA", "orders"), "tenantA_orders");
        assert_eq!(resolve("a_b", "c"), "a_b_c");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        assert_eq!(resolve("t", "docs"), resolve("t", "docs"));
    }
}
