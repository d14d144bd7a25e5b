//! Deterministic poster/requester assignment.
//!
//! Every result page shows two roster personas: one who posted the trivia
//! claim and one who asked for the fact-check. The pair is derived from the
//! result id alone, so anyone opening the same link sees the same two
//! people without any stored session state.
//!
//! Distinctness is structural. Candidates come from a cyclic table of
//! adjacent ids `(1,2), (2,3), ..., (N,1)`, which cannot contain `(x,x)`
//! for `N >= 2`.

use serde::{Deserialize, Serialize};

use crate::error::AssignmentError;
use crate::hashing::hash_seed;
use crate::locale::Locale;
use crate::numeric::parse_leading;
use crate::persona::{LocalizedPersona, Roster};
use crate::types::EntityId;

/// The two roster ids shown on a result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonaPair {
    pub poster_id: EntityId,
    pub requester_id: EntityId,
}

impl PersonaPair {
    pub fn new(poster_id: EntityId, requester_id: EntityId) -> Self {
        Self {
            poster_id,
            requester_id,
        }
    }
}

/// Cyclic candidate pairs for a roster of `N >= 2` personas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairTable {
    roster_size: EntityId,
    pairs: Vec<PersonaPair>,
}

impl PairTable {
    /// Build `(1,2), (2,3), ..., (N,1)` for a roster of `roster_size`.
    pub fn cyclic(roster_size: usize) -> Result<Self, AssignmentError> {
        if roster_size < 2 {
            return Err(AssignmentError::RosterTooSmall(roster_size));
        }
        let size = EntityId::try_from(roster_size)
            .map_err(|_| AssignmentError::RosterTooLarge(roster_size))?;

        let pairs = (1..=size)
            .map(|id| PersonaPair::new(id, id % size + 1))
            .collect();

        Ok(Self {
            roster_size: size,
            pairs,
        })
    }

    pub fn roster_size(&self) -> EntityId {
        self.roster_size
    }

    pub fn pairs(&self) -> &[PersonaPair] {
        &self.pairs
    }

    /// Select the candidate at `hash_seed(seed) mod N`.
    pub fn select(&self, seed: &str) -> PersonaPair {
        let index = u64::from(hash_seed(seed)) % self.pairs.len() as u64;
        // `index < pairs.len()`, which fits in usize.
        self.pairs[index as usize]
    }
}

/// Select a distinct pair for `seed` from a roster of `roster_size`.
///
/// Fails only when the roster is too small to hold two distinct personas.
///
/// # Examples
///
/// ```
/// use grokmind_core::assigner::{select_pair, PersonaPair};
///
/// assert_eq!(select_pair("abc-7", 5).unwrap(), PersonaPair::new(5, 1));
/// ```
pub fn select_pair(seed: &str, roster_size: usize) -> Result<PersonaPair, AssignmentError> {
    Ok(PairTable::cyclic(roster_size)?.select(seed))
}

/// The seed used for hash-derived assignment: the result id followed by the
/// decimal quiz id.
pub fn assignment_seed(result_id: &str, quiz_id: EntityId) -> String {
    format!("{result_id}{quiz_id}")
}

/// Parse a persona id from a URL parameter.
///
/// Reads the leading decimal digits (`"3abc"` is `3`); a value without any
/// counts as absent.
pub fn parse_persona_id(raw: &str) -> Option<EntityId> {
    parse_leading(raw, 10).ok()
}

/// Decide the poster/requester pair for a result.
///
/// 1. Two positive, different explicit ids are returned unchanged.
/// 2. Two positive, equal explicit ids keep the first and move the second to
///    the next roster id, `(b mod N) + 1`.
/// 3. Otherwise the pair is selected from `table` with
///    [`assignment_seed`]`(result_id, quiz_id)`.
///
/// Explicit ids are not checked against the roster here; [`materialize`]
/// reports ids it cannot find.
pub fn resolve(
    result_id: &str,
    quiz_id: EntityId,
    explicit_a: Option<EntityId>,
    explicit_b: Option<EntityId>,
    table: &PairTable,
) -> PersonaPair {
    match (explicit_a, explicit_b) {
        (Some(a), Some(b)) if a > 0 && b > 0 => {
            if a != b {
                PersonaPair::new(a, b)
            } else {
                PersonaPair::new(a, b.rem_euclid(table.roster_size()) + 1)
            }
        }
        _ => table.select(&assignment_seed(result_id, quiz_id)),
    }
}

/// Look up both personas of `pair` and localize them.
pub fn materialize(
    pair: PersonaPair,
    locale: Locale,
    roster: &Roster,
) -> Result<(LocalizedPersona, LocalizedPersona), AssignmentError> {
    let poster = roster.get(pair.poster_id)?.localize(locale);
    let requester = roster.get(pair.requester_id)?.localize(locale);
    Ok((poster, requester))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::tests::roster_of;
    use assert_matches::assert_matches;

    const RESULT_ID: &str = "7-2-85-loyw3v28";

    fn table(size: usize) -> PairTable {
        PairTable::cyclic(size).unwrap()
    }

    // -- PairTable --

    #[test]
    fn cyclic_table_for_five() {
        let pairs: Vec<_> = table(5)
            .pairs()
            .iter()
            .map(|p| (p.poster_id, p.requester_id))
            .collect();
        assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]);
    }

    #[test]
    fn cyclic_table_for_two() {
        let pairs: Vec<_> = table(2)
            .pairs()
            .iter()
            .map(|p| (p.poster_id, p.requester_id))
            .collect();
        assert_eq!(pairs, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn table_requires_two_personas() {
        assert_matches!(PairTable::cyclic(0), Err(AssignmentError::RosterTooSmall(0)));
        assert_matches!(PairTable::cyclic(1), Err(AssignmentError::RosterTooSmall(1)));
    }

    // -- select_pair --

    #[test]
    fn select_is_deterministic() {
        let first = select_pair("seed-123", 5).unwrap();
        for _ in 0..1000 {
            assert_eq!(select_pair("seed-123", 5).unwrap(), first);
        }
        assert_eq!(first, PersonaPair::new(5, 1));
    }

    #[test]
    fn select_known_seed() {
        // hash("abc-7") = 92597644, 92597644 mod 5 = 4
        assert_eq!(select_pair("abc-7", 5).unwrap(), PersonaPair::new(5, 1));
    }

    #[test]
    fn select_returns_distinct_members_for_every_size() {
        let seeds = ["", "a", "abc-7", "seed-123", "polygenelubricants", "知識人"];
        for size in 2..=12 {
            let table = table(size);
            for seed in seeds {
                let pair = table.select(seed);
                assert_ne!(pair.poster_id, pair.requester_id);
                assert!(table.pairs().contains(&pair));
            }
        }
    }

    #[test]
    fn select_pair_rejects_tiny_roster() {
        assert_matches!(select_pair("x", 1), Err(AssignmentError::RosterTooSmall(1)));
    }

    // -- resolve --

    #[test]
    fn explicit_distinct_ids_win() {
        let pair = resolve(RESULT_ID, 7, Some(3), Some(4), &table(5));
        assert_eq!(pair, PersonaPair::new(3, 4));
    }

    #[test]
    fn explicit_equal_ids_nudge_second() {
        let pair = resolve(RESULT_ID, 7, Some(3), Some(3), &table(5));
        assert_eq!(pair, PersonaPair::new(3, 4));
    }

    #[test]
    fn explicit_equal_ids_wrap_at_roster_end() {
        let pair = resolve(RESULT_ID, 7, Some(5), Some(5), &table(5));
        assert_eq!(pair, PersonaPair::new(5, 1));
    }

    #[test]
    fn explicit_equal_ids_beyond_roster_still_differ() {
        let pair = resolve(RESULT_ID, 7, Some(7), Some(7), &table(5));
        assert_eq!(pair, PersonaPair::new(7, 3));
    }

    #[test]
    fn explicit_ids_outside_roster_pass_through() {
        let pair = resolve(RESULT_ID, 7, Some(9), Some(2), &table(5));
        assert_eq!(pair, PersonaPair::new(9, 2));
    }

    #[test]
    fn missing_explicit_id_falls_back_to_hash() {
        let derived = table(5).select(&assignment_seed(RESULT_ID, 7));
        assert_eq!(resolve(RESULT_ID, 7, Some(3), None, &table(5)), derived);
        assert_eq!(resolve(RESULT_ID, 7, None, Some(3), &table(5)), derived);
        assert_eq!(resolve(RESULT_ID, 7, None, None, &table(5)), derived);
    }

    #[test]
    fn non_positive_explicit_ids_fall_back_to_hash() {
        let derived = table(5).select(&assignment_seed(RESULT_ID, 7));
        assert_eq!(resolve(RESULT_ID, 7, Some(0), Some(2), &table(5)), derived);
        assert_eq!(resolve(RESULT_ID, 7, Some(-1), Some(-1), &table(5)), derived);
    }

    #[test]
    fn hash_path_uses_result_id_and_quiz_id() {
        // hash("7-2-85-loyw3v287") mod 5 = 0
        assert_eq!(assignment_seed(RESULT_ID, 7), "7-2-85-loyw3v287");
        assert_eq!(
            resolve(RESULT_ID, 7, None, None, &table(5)),
            PersonaPair::new(1, 2)
        );
    }

    // -- parse_persona_id --

    #[test]
    fn parses_persona_ids_leniently() {
        assert_eq!(parse_persona_id("3"), Some(3));
        assert_eq!(parse_persona_id(" 4 "), Some(4));
        assert_eq!(parse_persona_id("3abc"), Some(3));
        assert_eq!(parse_persona_id("-2"), Some(-2));
        assert_eq!(parse_persona_id("abc"), None);
        assert_eq!(parse_persona_id(""), None);
    }

    // -- materialize --

    #[test]
    fn materializes_both_personas_in_locale() {
        let roster = roster_of(5);
        let (poster, requester) =
            materialize(PersonaPair::new(3, 4), Locale::Ja, &roster).unwrap();

        assert_eq!(poster.id, 3);
        assert_eq!(poster.name, "ペルソナ3");
        assert_eq!(requester.id, 4);
        assert_eq!(requester.name, "ペルソナ4");
    }

    #[test]
    fn materialize_fails_on_unknown_poster() {
        let roster = roster_of(5);
        assert_matches!(
            materialize(PersonaPair::new(9, 2), Locale::En, &roster),
            Err(AssignmentError::UnknownPersonaId(9))
        );
    }

    #[test]
    fn materialize_fails_on_unknown_requester() {
        let roster = roster_of(5);
        assert_matches!(
            materialize(PersonaPair::new(1, 6), Locale::En, &roster),
            Err(AssignmentError::UnknownPersonaId(6))
        );
    }
}
