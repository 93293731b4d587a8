/// Registry of all available lint rules
use crate::rules::{
    AllOfOnlyRefRuleImpl, AllOfRuleImpl, InheritRequiredRuleImpl,
    NamedPolymorphicRequestBodyRuleImpl, NoNestedTypeWithoutRefRuleImpl,
    RequireDescriptionRuleImpl, RequiredRuleImpl,
};
use crate::traits::DocumentLintRule;
use std::sync::{Arc, LazyLock};

/// Lazily initialized document rules.
/// Rules are stateless, so one instance serves every run.
static DOCUMENT_RULES: LazyLock<Vec<Arc<dyn DocumentLintRule>>> = LazyLock::new(|| {
    vec![
        Arc::new(AllOfOnlyRefRuleImpl),
        Arc::new(AllOfRuleImpl),
        Arc::new(InheritRequiredRuleImpl),
        Arc::new(NamedPolymorphicRequestBodyRuleImpl),
        Arc::new(NoNestedTypeWithoutRefRuleImpl),
        Arc::new(RequireDescriptionRuleImpl),
        Arc::new(RequiredRuleImpl),
    ]
});

#[must_use]
pub fn document_rules() -> &'static [Arc<dyn DocumentLintRule>] {
    &DOCUMENT_RULES
}

#[must_use]
pub fn find_rule(name: &str) -> Option<&'static Arc<dyn DocumentLintRule>> {
    document_rules().iter().find(|rule| rule.name() == name)
}

#[must_use]
pub fn all_rule_names() -> Vec<&'static str> {
    let mut names: Vec<_> = document_rules().iter().map(|rule| rule.name()).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_are_unique() {
        let names = all_rule_names();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_every_rule_is_described() {
        for rule in document_rules() {
            assert!(!rule.description().is_empty(), "{} has no description", rule.name());
        }
    }

    #[test]
    fn test_find_rule() {
        assert!(find_rule("require_description").is_some());
        assert!(find_rule("require-description").is_none());
    }
}
