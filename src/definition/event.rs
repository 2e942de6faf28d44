//! Named events and transition resolution.

use crate::builder::error::{BuildError, TransitionOverlap};
use crate::core::{Host, State};
use crate::definition::transition::TransitionRule;
use crate::engine::TransitionError;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// A named event owning an ordered list of transition rules.
pub struct EventDefinition<H: Host> {
    name: String,
    success_hook: Option<String>,
    rules: Vec<TransitionRule<H>>,
}

impl<H: Host> EventDefinition<H> {
    /// Create an event, rejecting rules that make resolution ambiguous.
    ///
    /// Two rules conflict when they share a source state and at least one
    /// target. Every conflicting pair is reported, not just the first.
    pub fn new(
        name: impl Into<String>,
        success_hook: Option<String>,
        rules: Vec<TransitionRule<H>>,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        match validate_rules(&rules) {
            Validation::Success(_) => Ok(Self {
                name,
                success_hook,
                rules,
            }),
            Validation::Failure(overlaps) => Err(BuildError::OverlappingTransitions {
                event: name,
                overlaps: overlaps.iter().cloned().collect(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host method invoked after a persisted transition completes.
    pub fn success_hook(&self) -> Option<&str> {
        self.success_hook.as_deref()
    }

    pub fn rules(&self) -> &[TransitionRule<H>] {
        &self.rules
    }

    /// Resolve the next state from `current`.
    ///
    /// Rules are tried in declaration order. A rule is skipped when a target
    /// is requested and the rule cannot reach it; otherwise its guard is
    /// evaluated and the first passing rule wins. The winner's action runs
    /// before the next state is returned.
    ///
    /// Returns `Ok(None)` when rules exist but every guard rejected, and
    /// `NoMatchingTransition` when no rule starts at `current`.
    pub fn resolve(
        &self,
        host: &mut H,
        current: &H::State,
        requested: Option<&str>,
        args: &[Value],
    ) -> Result<Option<H::State>, TransitionError> {
        let mut candidates = self
            .rules
            .iter()
            .filter(|rule| rule.applies_from(current))
            .peekable();

        if candidates.peek().is_none() {
            return Err(TransitionError::NoMatchingTransition {
                event: self.name.clone(),
                from: current.name().to_string(),
            });
        }

        for rule in candidates {
            let target = match requested {
                Some(name) => match rule.target_named(name) {
                    Some(target) => target,
                    None => continue,
                },
                None => rule.default_target(),
            };

            if rule.evaluate_guard(host, args)? {
                let next = target.clone();
                rule.run_action(host, args)?;
                return Ok(Some(next));
            }
        }

        Ok(None)
    }

    /// Every target reachable from `from`, deduplicated, in declaration order.
    pub fn possible_destinations(&self, from: &H::State) -> Vec<H::State> {
        let mut destinations: Vec<H::State> = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.applies_from(from)) {
            for target in rule.to() {
                if !destinations.contains(target) {
                    destinations.push(target.clone());
                }
            }
        }
        destinations
    }

    pub fn transitions_from_state(&self, state: &H::State) -> bool {
        self.rules.iter().any(|rule| rule.applies_from(state))
    }

    pub fn transitions_to_state(&self, state: &H::State) -> bool {
        self.rules.iter().any(|rule| rule.leads_to(state))
    }
}

/// Check every rule against the targets already claimed for its source.
fn validate_rules<H: Host>(
    rules: &[TransitionRule<H>],
) -> Validation<(), NonEmptyVec<TransitionOverlap>> {
    let mut claimed: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut checks: Vec<Validation<(), NonEmptyVec<TransitionOverlap>>> = Vec::new();

    for rule in rules {
        let from = rule.from().name();
        let existing = claimed.entry(from).or_default();
        let targets: HashSet<&str> = rule.to().iter().map(|state| state.name()).collect();

        for to in rule.to().iter().map(|state| state.name()) {
            let check = if existing.contains(to) {
                Validation::fail(TransitionOverlap {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        existing.extend(targets);
    }

    Validation::all_vec(checks).map(|_| ())
}

impl<H: Host> Clone for EventDefinition<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            success_hook: self.success_hook.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<H: Host> std::fmt::Debug for EventDefinition<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDefinition")
            .field("name", &self.name)
            .field("success_hook", &self.success_hook)
            .field("rules", &self.rules)
            .finish()
    }
}
