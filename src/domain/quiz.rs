//! Random selection of the next quiz question.

use crate::domain::Question;
use rand::Rng;

/// Pick one question uniformly at random from the remaining candidates.
///
/// Returns `None` when the candidate set is exhausted, which the play
/// endpoint reports as `question: null` so the client can end the round.
pub fn pick_random<'a, R: Rng>(candidates: &'a [Question], rng: &mut R) -> Option<&'a Question> {
    if candidates.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..candidates.len());
    candidates.get(idx)
}
