//! Ordered fallback resolution.
//!
//! Every record field is resolved the same way: walk the candidates in
//! priority order (config, manifest, computed) and take the first one that
//! is present. Strings must be non-empty to count; sequences, maps and
//! flags count whenever they are set, even when empty.

use serde_json::{Map, Value};

/// Whether a set value should win over lower-priority candidates
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        true
    }
}

impl Presence for Map<String, Value> {
    fn is_present(&self) -> bool {
        true
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        true
    }
}

/// First present candidate, if any
pub fn first_present<T, I>(candidates: I) -> Option<T>
where
    T: Presence,
    I: IntoIterator<Item = Option<T>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(Presence::is_present)
}

/// First present candidate, or the hard-coded `default`
pub fn resolve<T, I>(candidates: I, default: impl FnOnce() -> T) -> T
where
    T: Presence,
    I: IntoIterator<Item = Option<T>>,
{
    first_present(candidates).unwrap_or_else(default)
}

/// [`resolve`] specialised for string fields with a literal default
pub fn resolve_str<I>(candidates: I, default: &str) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    resolve(candidates, || default.to_string())
}
