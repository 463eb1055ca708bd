//! Ordered first-match-wins rule chains.
//!
//! Each activity's precedence policy is a [`RuleChain`]: named rules are
//! tried in order and the first one that returns `Some` decides the outcome.
//! When no rule matches, the chain's fallback is used. Rules are plain
//! closures over a [`DerivationContext`] and can be called one at a time
//! through [`RuleChain::get`] in tests.

use connect_concepts::ConceptError;
use tracing::trace;

use crate::context::DerivationContext;

type RuleFn<T> =
    Box<dyn Fn(&DerivationContext<'_>) -> Result<Option<T>, ConceptError> + Send + Sync>;

pub struct Rule<T> {
    name: &'static str,
    apply: RuleFn<T>,
}

impl<T> Rule<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, ctx: &DerivationContext<'_>) -> Result<Option<T>, ConceptError> {
        (self.apply)(ctx)
    }
}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Result of evaluating a chain: the outcome and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision<T> {
    /// `None` when the fallback was used.
    pub rule: Option<&'static str>,
    pub outcome: T,
}

#[derive(Debug)]
pub struct RuleChain<T> {
    rules: Vec<Rule<T>>,
    fallback: T,
}

impl<T: Clone> RuleChain<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule; it is tried after every rule added before it.
    #[must_use]
    pub fn rule<F>(mut self, name: &'static str, apply: F) -> Self
    where
        F: Fn(&DerivationContext<'_>) -> Result<Option<T>, ConceptError> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            name,
            apply: Box::new(apply),
        });
        self
    }

    pub fn decide(&self, ctx: &DerivationContext<'_>) -> Result<Decision<T>, ConceptError> {
        for rule in &self.rules {
            if let Some(outcome) = rule.apply(ctx)? {
                trace!(rule = rule.name, "rule matched");
                return Ok(Decision {
                    rule: Some(rule.name),
                    outcome,
                });
            }
        }
        Ok(Decision {
            rule: None,
            outcome: self.fallback.clone(),
        })
    }

    pub fn evaluate(&self, ctx: &DerivationContext<'_>) -> Result<T, ConceptError> {
        self.decide(ctx).map(|decision| decision.outcome)
    }

    pub fn get(&self, name: &str) -> Option<&Rule<T>> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_concepts::default_concepts;
    use connect_concepts::paths::BLOOD_FLAG;
    use connect_model::ParticipantRecord;

    fn chain() -> RuleChain<&'static str> {
        RuleChain::new("fallback")
            .rule("yes", |ctx| Ok(ctx.is_yes(&BLOOD_FLAG)?.then_some("yes")))
            .rule("present", |ctx| {
                Ok(ctx.is_present(&BLOOD_FLAG)?.then_some("present"))
            })
    }

    #[test]
    fn first_match_wins() {
        let record = ParticipantRecord::from_json(r#"{"878865966": 353358909}"#).unwrap();
        let ctx = DerivationContext::new(&record, default_concepts());
        let decision = chain().decide(&ctx).unwrap();
        assert_eq!(decision.rule, Some("yes"));
        assert_eq!(decision.outcome, "yes");
    }

    #[test]
    fn fallback_when_nothing_matches() {
        let record = ParticipantRecord::new();
        let ctx = DerivationContext::new(&record, default_concepts());
        let decision = chain().decide(&ctx).unwrap();
        assert_eq!(decision.rule, None);
        assert_eq!(decision.outcome, "fallback");
    }

    #[test]
    fn rules_are_individually_callable() {
        let record = ParticipantRecord::from_json(r#"{"878865966": 104430631}"#).unwrap();
        let ctx = DerivationContext::new(&record, default_concepts());
        let chain = chain();
        assert_eq!(chain.rule_names(), vec!["yes", "present"]);
        assert_eq!(chain.get("yes").unwrap().apply(&ctx).unwrap(), None);
        assert_eq!(
            chain.get("present").unwrap().apply(&ctx).unwrap(),
            Some("present")
        );
    }
}
