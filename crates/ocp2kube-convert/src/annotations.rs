//! Unsupported-field annotations
//!
//! Each translator owns a table of field facts: a field path on the source
//! kind plus a predicate saying whether the concrete source uses that field
//! in a way the target cannot express. Recording evaluates the table and
//! yields one `<caller>/<Kind>.<path>: unsupported` annotation per hit.
//!
//! Keys follow the Kubernetes annotation key rules: the name segment after
//! the `/` is at most 63 characters and the prefix at most 253. A fact whose
//! key would break the bound is skipped with a warning rather than emitted.

use std::collections::BTreeMap;

use crate::diagnostics::DiagnosticSink;
use crate::error::ConversionWarning;

/// Annotation value marking an unrepresented field
pub const UNSUPPORTED: &str = "unsupported";

/// Maximum length of the name segment of an annotation key
pub const MAX_KEY_NAME_LEN: usize = 63;

/// Maximum length of the prefix segment of an annotation key
pub const MAX_KEY_PREFIX_LEN: usize = 253;

/// One `(field path, is unsupported?)` entry
pub struct FieldFact<S> {
    pub path: String,
    pub unsupported: fn(&S) -> bool,
}

impl<S> FieldFact<S> {
    pub fn new(path: impl Into<String>, unsupported: fn(&S) -> bool) -> Self {
        Self {
            path: path.into(),
            unsupported,
        }
    }

    /// A fact that fires for every source instance
    pub fn always(path: impl Into<String>) -> Self {
        Self::new(path, |_| true)
    }
}

impl<S> Clone for FieldFact<S> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            unsupported: self.unsupported,
        }
    }
}

impl<S> std::fmt::Debug for FieldFact<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldFact").field("path", &self.path).finish()
    }
}

/// Ordered table of facts for one source kind
pub struct FieldFacts<S> {
    kind: String,
    facts: Vec<FieldFact<S>>,
}

impl<S> FieldFacts<S> {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            facts: Vec::new(),
        }
    }

    pub fn fact(mut self, fact: FieldFact<S>) -> Self {
        self.facts.push(fact);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldFact<S>> {
        self.facts.iter()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl<S> Clone for FieldFacts<S> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            facts: self.facts.clone(),
        }
    }
}

impl<S> std::fmt::Debug for FieldFacts<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldFacts")
            .field("kind", &self.kind)
            .field("facts", &self.facts)
            .finish()
    }
}

/// Build the annotation key for a field, or `None` if it breaks the length bounds
pub fn annotation_key(caller: &str, kind: &str, path: &str) -> Option<String> {
    let name = format!("{}.{}", kind, path);
    if name.len() > MAX_KEY_NAME_LEN || caller.is_empty() || caller.len() > MAX_KEY_PREFIX_LEN {
        return None;
    }
    Some(format!("{}/{}", caller, name))
}

/// Evaluate `facts` against `source` and return the diagnostic annotations
///
/// Every hit is also reported to `sink`.
pub fn record<S>(
    caller: &str,
    resource: &str,
    facts: &FieldFacts<S>,
    source: &S,
    sink: &mut dyn DiagnosticSink,
) -> BTreeMap<String, String> {
    let mut recorded = BTreeMap::new();

    for fact in facts.iter().filter(|fact| (fact.unsupported)(source)) {
        match annotation_key(caller, facts.kind(), &fact.path) {
            Some(key) => {
                tracing::warn!("[{}] {}.{} is unsupported", caller, facts.kind(), fact.path);
                sink.emit(ConversionWarning::unsupported(facts.kind(), resource, &fact.path));
                recorded.insert(key, UNSUPPORTED.to_string());
            }
            None => {
                tracing::warn!(
                    "[{}] {}.{} is unsupported but its annotation key exceeds {} characters",
                    caller,
                    facts.kind(),
                    fact.path,
                    MAX_KEY_NAME_LEN
                );
                sink.emit(
                    ConversionWarning::unsupported(facts.kind(), resource, &fact.path)
                        .with_suggestion("annotation omitted: key too long"),
                );
            }
        }
    }

    recorded
}

/// Merge recorded annotations into an existing set
///
/// Existing keys always win, so merging is idempotent and never rewrites an
/// annotation the source already carried.
pub fn merge(
    existing: Option<BTreeMap<String, String>>,
    recorded: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut annotations = existing.unwrap_or_default();
    for (key, value) in recorded {
        annotations.entry(key).or_insert(value);
    }
    annotations
}

/// `merge`, mapping an empty result to `None` the way `ObjectMeta` expects
pub fn merge_into_meta(
    existing: Option<BTreeMap<String, String>>,
    recorded: BTreeMap<String, String>,
) -> Option<BTreeMap<String, String>> {
    let merged = merge(existing, recorded);
    if merged.is_empty() { None } else { Some(merged) }
}
