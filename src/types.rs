use std::{
    collections::BTreeMap,
    fmt::{Debug, Display, Formatter},
    hash::Hash,
};

#[cfg(feature = "serde")]
use {
    serde::{Deserialize, Serialize},
    std::{collections::BTreeSet, io::Read},
    tabled::Tabled,
};

use crate::error::{Result, ShapleyError};

/// Bound for player identifiers. Any ordered, hashable, printable label works:
/// small integers, strings, whatever the caller uses to name participants.
pub trait PlayerId: Clone + Ord + Hash + Debug + Display + Send + Sync {}

impl<T: Clone + Ord + Hash + Debug + Display + Send + Sync> PlayerId for T {}

/// A non-empty subset of players, stored as the sorted, deduplicated member
/// sequence. Equality is set equality: membership decides, not insertion order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Coalition<P: PlayerId> {
    members: Vec<P>,
}

impl<P: PlayerId> Coalition<P> {
    /// Build a coalition from any iterator of players, canonicalizing to the
    /// sorted unique member list.
    pub fn new<I: IntoIterator<Item = P>>(members: I) -> Self {
        let mut members: Vec<P> = members.into_iter().collect();
        members.sort();
        members.dedup();
        Coalition { members }
    }

    pub fn members(&self) -> &[P] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, player: &P) -> bool {
        self.members.binary_search(player).is_ok()
    }
}

impl<P: PlayerId> Display for Coalition<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{member}")?;
        }
        write!(f, "}}")
    }
}

impl<P: PlayerId> FromIterator<P> for Coalition<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Coalition::new(iter)
    }
}

/// The characteristic function of a cooperative game: the worth every
/// non-empty coalition can achieve on its own. The empty coalition has
/// implicit worth 0 and cannot be inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueFunction<P: PlayerId> {
    values: BTreeMap<Coalition<P>, f64>,
}

impl<P: PlayerId> ValueFunction<P> {
    pub fn new() -> Self {
        ValueFunction {
            values: BTreeMap::new(),
        }
    }

    /// Record the worth of a coalition. The key is canonicalized, so any
    /// ordering or duplication in `members` maps to the same entry.
    /// Inserting the empty coalition is a no-op.
    pub fn insert<I: IntoIterator<Item = P>>(&mut self, members: I, worth: f64) {
        let coalition = Coalition::new(members);
        if !coalition.is_empty() {
            self.values.insert(coalition, worth);
        }
    }

    /// Worth of a coalition; the empty coalition is worth 0.
    pub fn get(&self, coalition: &Coalition<P>) -> Option<f64> {
        if coalition.is_empty() {
            return Some(0.0);
        }
        self.values.get(coalition).copied()
    }

    /// Worth of a coalition, failing with the absent subset named.
    pub fn worth(&self, coalition: &Coalition<P>) -> Result<f64> {
        self.get(coalition)
            .ok_or_else(|| ShapleyError::MissingCoalitionValue {
                coalition: coalition.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Coalition<P>, f64)> {
        self.values.iter().map(|(c, &v)| (c, v))
    }
}

impl<P: PlayerId, I: IntoIterator<Item = P>> FromIterator<(I, f64)> for ValueFunction<P> {
    fn from_iter<T: IntoIterator<Item = (I, f64)>>(iter: T) -> Self {
        let mut vf = ValueFunction::new();
        for (members, worth) in iter {
            vf.insert(members, worth);
        }
        vf
    }
}

/// Individual Shapley value for a player
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, Tabled))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShapleyValue {
    pub value: f64,
    #[cfg_attr(feature = "serde", tabled(display = "display_as_percent"))]
    pub proportion: f64,
}

#[cfg(feature = "serde")]
fn display_as_percent(proportion: &f64) -> String {
    format!("{:.2}%", proportion * 100.0)
}

impl Display for ShapleyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "value: {}, proportion: {}", self.value, self.proportion)
    }
}

/// Serializable description of a game: the player labels plus the worth of
/// every non-empty coalition. This is the CLI's input document.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSpec {
    pub players: Vec<String>,
    pub coalitions: Vec<CoalitionWorth>,
}

#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoalitionWorth {
    pub members: Vec<String>,
    pub worth: f64,
}

/// One CSV line: coalition members joined by ';' plus the coalition's worth.
#[cfg(feature = "serde")]
#[derive(Debug, Deserialize)]
struct CsvRow {
    members: String,
    worth: f64,
}

#[cfg(feature = "serde")]
impl CoalitionWorth {
    /// Parse a `a;b;c` member list: split on ';', trim whitespace around
    /// each label, drop empty segments.
    pub fn parse_members(list: &str) -> Vec<String> {
        list.split(';')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(feature = "serde")]
impl GameSpec {
    /// Read a game from CSV rows with `members,worth` columns, `members`
    /// listing the coalition's players separated by semicolons. The player
    /// set is the union of all listed members.
    pub fn from_csv_reader<R: Read>(reader: R) -> std::result::Result<GameSpec, csv::Error> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut players = BTreeSet::new();
        let mut coalitions = Vec::new();

        for record in rdr.deserialize() {
            let row: CsvRow = record?;
            let members = CoalitionWorth::parse_members(&row.members);
            players.extend(members.iter().cloned());
            coalitions.push(CoalitionWorth {
                members,
                worth: row.worth,
            });
        }

        Ok(GameSpec {
            players: players.into_iter().collect(),
            coalitions,
        })
    }

    pub fn into_parts(self) -> (Vec<String>, ValueFunction<String>) {
        let mut vf = ValueFunction::new();
        for entry in self.coalitions {
            vf.insert(entry.members, entry.worth);
        }
        (self.players, vf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coalition_canonicalization() {
        let a = Coalition::new(vec![3, 1, 2]);
        let b = Coalition::new(vec![1, 2, 3, 2]);
        assert_eq!(a, b);
        assert_eq!(a.members(), &[1, 2, 3]);
    }

    #[test]
    fn test_coalition_display() {
        let c = Coalition::new(vec![10, 1]);
        assert_eq!(c.to_string(), "{1, 10}");

        let named = Coalition::new(vec!["french", "spanish"]);
        assert_eq!(named.to_string(), "{french, spanish}");
    }

    #[test]
    fn test_large_identifiers_do_not_collide() {
        // {1, 0} and {10} must be distinct coalitions for any identifier domain.
        let a = Coalition::new(vec![1u32, 0]);
        let b = Coalition::new(vec![10u32]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_value_function_lookup_by_membership() {
        let mut vf = ValueFunction::new();
        vf.insert(vec![2, 1], 5.0);

        let c = Coalition::new(vec![1, 2]);
        assert_eq!(vf.get(&c), Some(5.0));

        let missing = Coalition::new(vec![1, 3]);
        assert_eq!(vf.get(&missing), None);
        assert!(vf.worth(&missing).is_err());
    }

    #[test]
    fn test_empty_coalition_is_implicit_zero() {
        let mut vf: ValueFunction<u32> = ValueFunction::new();
        vf.insert(Vec::<u32>::new(), 99.0);
        assert!(vf.is_empty());

        let empty = Coalition::new(Vec::<u32>::new());
        assert_eq!(vf.get(&empty), Some(0.0));
    }
}
