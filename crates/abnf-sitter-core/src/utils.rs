/// Convert an ABNF rule name into a generator identifier.
///
/// ABNF allows hyphens in rule names, tree-sitter identifiers do not.
/// Hyphens become underscores; everything else is kept as written.
///
/// # Examples
/// ```
/// use abnf_sitter_core::utils::normalize_rule_name;
/// assert_eq!(normalize_rule_name("path-abempty"), "path_abempty");
/// assert_eq!(normalize_rule_name("path_abempty"), "path_abempty"); // idempotent
/// ```
pub fn normalize_rule_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Comparison key for rule names.
///
/// RFC 5234 rule names are case-insensitive. The key also ignores the
/// hyphen/underscore difference and a leading hidden-rule marker, so names
/// reported back by the generator resolve to their source rule.
///
/// # Examples
/// ```
/// use abnf_sitter_core::utils::rule_key;
/// assert_eq!(rule_key("Path-Abempty"), "path_abempty");
/// assert_eq!(rule_key("_path_abempty"), "path_abempty");
/// ```
pub fn rule_key(name: &str) -> String {
    normalize_rule_name(name)
        .trim_start_matches('_')
        .to_ascii_lowercase()
}

/// Whether two spellings name the same rule.
pub fn same_rule(a: &str, b: &str) -> bool {
    rule_key(a) == rule_key(b)
}
