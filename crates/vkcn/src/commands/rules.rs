//! Rules command - List the built-in rules

use vkcn_patina::{RuleMeta, Severity, BUILTIN_RULES};

fn rule_line(meta: &RuleMeta) -> String {
    let severity = match meta.default_severity {
        Severity::Error => "error",
        Severity::Warning => "warn",
    };
    let mut flags = Vec::new();
    if meta.fixable {
        flags.push("fixable");
    }
    if meta.has_suggestions {
        flags.push("suggestions");
    }
    format!(
        "{:<32} {:<6} {:<22} {}",
        meta.name,
        severity,
        flags.join(", "),
        meta.description
    )
}

pub fn run() -> i32 {
    for meta in BUILTIN_RULES {
        println!("{}", rule_line(meta));
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_line() {
        let line = rule_line(BUILTIN_RULES[0]);
        assert!(line.starts_with("vkcn/no-convention-violation"));
        assert!(line.contains("error"));
        assert!(line.contains("fixable, suggestions"));
    }
}
