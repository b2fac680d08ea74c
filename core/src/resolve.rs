use crate::{DocId, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Documents containing every matched query token.
    #[default]
    And,
    /// Documents containing at least one query token.
    Or,
}

impl FromStr for MatchPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "and" => Ok(MatchPolicy::And),
            "or" => Ok(MatchPolicy::Or),
            _ => Err(Error::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchPolicy::And => "and",
            MatchPolicy::Or => "or",
        })
    }
}

/// Combine per-token document sets. No sets means no candidates under either policy.
pub fn resolve<'a, I>(token_sets: I, policy: MatchPolicy) -> HashSet<DocId>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = &'a DocId>,
{
    let mut sets = token_sets.into_iter();
    let first: HashSet<DocId> = match sets.next() {
        Some(set) => set.into_iter().cloned().collect(),
        None => return HashSet::new(),
    };
    match policy {
        MatchPolicy::And => sets.fold(first, |acc, set| {
            if acc.is_empty() { return acc; }
            let other: HashSet<&DocId> = set.into_iter().collect();
            acc.into_iter().filter(|d| other.contains(d)).collect()
        }),
        MatchPolicy::Or => sets.fold(first, |mut acc, set| {
            acc.extend(set.into_iter().cloned());
            acc
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(xs: &[&str]) -> Vec<DocId> { xs.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn and_intersects_or_unions() {
        let a = ids(&["1", "2", "3"]);
        let b = ids(&["2", "3", "4"]);
        let and = resolve([&a, &b], MatchPolicy::And);
        let or = resolve([&a, &b], MatchPolicy::Or);
        assert_eq!(and, ids(&["2", "3"]).into_iter().collect());
        assert_eq!(or, ids(&["1", "2", "3", "4"]).into_iter().collect());
    }

    #[test]
    fn no_sets_resolve_to_nothing() {
        let none: Vec<Vec<DocId>> = Vec::new();
        assert!(resolve(&none, MatchPolicy::And).is_empty());
        assert!(resolve(&none, MatchPolicy::Or).is_empty());
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("AND".parse::<MatchPolicy>().unwrap(), MatchPolicy::And);
        assert_eq!(" Or ".parse::<MatchPolicy>().unwrap(), MatchPolicy::Or);
        assert!(matches!("xor".parse::<MatchPolicy>(), Err(Error::InvalidPolicy(_))));
    }
}
