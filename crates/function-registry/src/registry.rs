// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use crate::{
    RegistryError, RegistryResult, RewriteConfigSupplier, RewriteRule, RuleSource, builtin,
};
use dialect_rewrite_ir::{DialectVersion, FunctionCall, FunctionIdentity, RewriteResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace, warn};

/// How a later registration source treats an identity an earlier source claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Duplicate identities are a construction-time error
    #[default]
    Reject,
    /// Later sources replace earlier ones; duplicates within one source still fail
    Override,
}

#[derive(Debug, Clone)]
struct RegisteredRule {
    rule: RewriteRule,
    source: RuleSource,
}

/// Builder for [`RewriteRegistry`]
///
/// Sources are registered in order. Each call to [`register_source`] is one
/// source batch; the conflict policy decides what happens when a batch claims
/// an identity registered by an earlier batch.
///
/// [`register_source`]: RegistryBuilder::register_source
#[derive(Debug)]
pub struct RegistryBuilder {
    connector: String,
    version: DialectVersion,
    policy: ConflictPolicy,
    rules: HashMap<FunctionIdentity, RegisteredRule>,
}

impl RegistryBuilder {
    pub fn new(connector: impl Into<String>, version: DialectVersion) -> Self {
        Self {
            connector: connector.into(),
            version,
            policy: ConflictPolicy::default(),
            rules: HashMap::new(),
        }
    }

    /// Set the conflict policy for subsequent registrations
    pub fn conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register one source batch of rules
    ///
    /// The whole batch is checked before any rule is inserted, so a conflict
    /// leaves the builder unchanged.
    pub fn register_source<I>(&mut self, source: RuleSource, rules: I) -> RegistryResult<&mut Self>
    where
        I: IntoIterator<Item = (FunctionIdentity, RewriteRule)>,
    {
        let batch: Vec<(FunctionIdentity, RewriteRule)> = rules.into_iter().collect();

        let mut seen = HashSet::new();
        for (identity, _) in &batch {
            if !seen.insert(identity) {
                return Err(RegistryError::Conflict {
                    function: identity.to_string(),
                    existing: source,
                    incoming: source,
                });
            }
            if let (Some(existing), ConflictPolicy::Reject) =
                (self.rules.get(identity), self.policy)
            {
                return Err(RegistryError::Conflict {
                    function: identity.to_string(),
                    existing: existing.source,
                    incoming: source,
                });
            }
        }

        for (identity, rule) in batch {
            if let Some(existing) = self.rules.get(&identity) {
                warn!(
                    "{} rule for {} overrides {} rule",
                    source, identity, existing.source
                );
            }
            debug!(
                "Registering {} rewrite for {} from {} rules",
                rule.kind(),
                identity,
                source
            );
            self.rules.insert(identity, RegisteredRule { rule, source });
        }

        Ok(self)
    }

    /// Resolve the supplier's templates for this connector and version and register them
    pub fn register_supplier(
        &mut self,
        supplier: &dyn RewriteConfigSupplier,
    ) -> RegistryResult<&mut Self> {
        let templates = supplier.templates(&self.connector, self.version)?;
        self.register_source(
            RuleSource::Config,
            templates
                .into_iter()
                .map(|(identity, template)| (identity, RewriteRule::Template(template))),
        )
    }

    /// Register the static ClickHouse rules for the builder's version: built-ins,
    /// then unsupported markers
    pub fn register_clickhouse_builtins(&mut self) -> RegistryResult<&mut Self> {
        self.register_source(
            RuleSource::BuiltIn,
            builtin::clickhouse::builtin_rules(self.version),
        )?;
        self.register_source(
            RuleSource::UnsupportedMarker,
            builtin::clickhouse::unsupported_markers(),
        )
    }

    /// Freeze the registry
    pub fn build(self) -> RewriteRegistry {
        RewriteRegistry {
            connector: self.connector,
            version: self.version,
            rules: self.rules,
        }
    }
}

/// Immutable mapping from function identity to rewrite rule
///
/// Built once per writer and read-only afterwards, so a single instance can be
/// shared across concurrent compilations without locking.
#[derive(Debug, Clone)]
pub struct RewriteRegistry {
    connector: String,
    version: DialectVersion,
    rules: HashMap<FunctionIdentity, RegisteredRule>,
}

impl RewriteRegistry {
    /// Create a builder
    pub fn builder(connector: impl Into<String>, version: DialectVersion) -> RegistryBuilder {
        RegistryBuilder::new(connector, version)
    }

    /// Render a function call
    ///
    /// Dispatches to the registered rule, or falls through to the engine-default
    /// call rendering when no rule is registered.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let name = FunctionIdentity::new("from_base64");
    /// let args = vec!["'aGk='".to_string()];
    /// let sql = registry.rewrite(&FunctionCall::new(&name, &args))?;
    /// assert_eq!(sql, "base64Decode('aGk=')");
    /// ```
    pub fn rewrite(&self, call: &FunctionCall<'_>) -> RewriteResult<String> {
        match self.rules.get(call.name) {
            Some(entry) => entry.rule.apply(&self.connector, call),
            None => {
                trace!("No rewrite rule for {}, using default rendering", call.name);
                Ok(call.render_default())
            }
        }
    }

    /// Rule registered for a function
    pub fn rule(&self, identity: &FunctionIdentity) -> Option<&RewriteRule> {
        self.rules.get(identity).map(|r| &r.rule)
    }

    /// Source that registered a function's rule
    pub fn source(&self, identity: &FunctionIdentity) -> Option<RuleSource> {
        self.rules.get(identity).map(|r| r.source)
    }

    pub fn contains(&self, identity: &FunctionIdentity) -> bool {
        self.rules.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn connector(&self) -> &str {
        &self.connector
    }

    pub fn version(&self) -> DialectVersion {
        self.version
    }

    /// Registered identities
    pub fn identities(&self) -> impl Iterator<Item = &FunctionIdentity> {
        self.rules.keys()
    }
}
