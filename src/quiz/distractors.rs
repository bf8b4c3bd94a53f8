//! Wrong-answer generation.

use rand::Rng;
use rand::seq::SliceRandom;

/// Number of wrong answers offered with each question.
pub const DISTRACTOR_COUNT: usize = 3;

/// Produces three wrong answers for `correct`.
///
/// Candidates are tried in order until three distinct ones are found:
///
/// 1. numeric neighbours `v-1, v+1, v+2, v-2, v*10` when `correct` is a number,
/// 2. other answers from `pool`, in random order,
/// 3. synthetic `"{correct}_alt{i}"` fillers.
///
/// The result never contains `correct` or a duplicate and is returned in
/// random order.
pub fn make_distractors<R: Rng + ?Sized>(correct: &str, pool: &[String], rng: &mut R) -> Vec<String> {
    let mut picked: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    let offer = |candidate: String, picked: &mut Vec<String>| {
        if picked.len() < DISTRACTOR_COUNT && candidate != correct && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    };

    if let Some(value) = correct.trim().parse::<f64>().ok().filter(|v| v.is_finite()) {
        for n in [value - 1.0, value + 1.0, value + 2.0, value - 2.0, value * 10.0] {
            offer(format_number(n), &mut picked);
        }
    }

    let mut others: Vec<&String> = pool.iter().filter(|p| !p.trim().is_empty()).collect();
    others.shuffle(rng);
    for other in others {
        offer(other.clone(), &mut picked);
    }

    let mut i = 0;
    while picked.len() < DISTRACTOR_COUNT {
        offer(format!("{correct}_alt{i}"), &mut picked);
        i += 1;
    }

    picked.shuffle(rng);
    picked
}

/// Formats whole numbers without a decimal point.
fn format_number(n: f64) -> String {
    if (n - n.round()).abs() < 1e-9 && n.abs() < 1e15 {
        format!("{}", n.round() as i64)
    } else {
        format!("{n}")
    }
}

