//! Two-level minimization via Quine–McCluskey.
//!
//! # Algorithm
//!
//! 1. Every required and don't-care index becomes a fully specified implicant.
//! 2. Implicants are grouped by their number of `1` positions; each pair from
//!    adjacent groups that differs in exactly one position merges, that
//!    position becoming don't care. Merged implicants form the next round.
//! 3. Implicants never merged within a round are prime. Rounds repeat until
//!    nothing merges.
//! 4. Every required index covered by exactly one prime forces that prime
//!    (essential primes).
//! 5. Remaining indices are covered greedily: the prime covering the most
//!    still-uncovered indices is taken first, ties going to the earlier prime.
//!
//! Step 5 is a heuristic. The resulting cover is irredundant in practice but
//! is not guaranteed to be the smallest one (that needs branch-and-bound).
//!
//! Each call works on its own data: the "used" marks of a round live in a set
//! local to that round, and every round builds a fresh collection.
//!
//! # Example
//!
//! ```
//! use logic_rs::minimize::minimize_sop;
//!
//! assert_eq!(minimize_sop(&[0, 2, 4, 6], &["A", "B", "C"]), "C'");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::debug;

use crate::canonical::{index_set, product_term, sum_term};
use crate::expr::Expression;
use crate::implicant::Implicant;

/// All prime implicants of the function that is 1 on `indices`.
pub fn prime_implicants(indices: &BTreeSet<u64>, n: usize) -> Vec<Implicant> {
    let mut current: BTreeSet<Implicant> = indices.iter().map(|&m| Implicant::from_index(m, n)).collect();
    let mut primes: BTreeSet<Implicant> = BTreeSet::new();
    let mut round = 0;

    while !current.is_empty() {
        round += 1;
        let mut groups: BTreeMap<usize, Vec<&Implicant>> = BTreeMap::new();
        for implicant in current.iter() {
            groups.entry(implicant.ones()).or_default().push(implicant);
        }

        let mut used: HashSet<&Implicant> = HashSet::new();
        let mut next: BTreeSet<Implicant> = BTreeSet::new();
        for (ones, group) in groups.iter() {
            let Some(upper) = groups.get(&(ones + 1)) else {
                continue;
            };
            for &a in group {
                for &b in upper {
                    if let Some(merged) = a.merge(b) {
                        used.insert(a);
                        used.insert(b);
                        next.insert(merged);
                    }
                }
            }
        }

        debug!(
            "prime_implicants: round {}: {} implicant(s), {} merged, {} new",
            round,
            current.len(),
            used.len(),
            next.len()
        );

        primes.extend(current.iter().filter(|i| !used.contains(i)).cloned());
        current = next;
    }

    primes.into_iter().collect()
}

/// Selects prime implicants covering every index in `required`.
///
/// Don't-care indices may be covered but are never required. An index listed
/// as both required and don't care counts as required.
pub fn minimize(required: &[u64], dont_cares: &[u64], n: usize) -> Vec<Implicant> {
    let required = index_set(required, n);
    let dont_cares: BTreeSet<u64> = index_set(dont_cares, n).difference(&required).copied().collect();
    debug!(
        "minimize(required = {}, dont_cares = {}, n = {})",
        required.len(),
        dont_cares.len(),
        n
    );
    if required.is_empty() {
        return Vec::new();
    }

    let all: BTreeSet<u64> = required.union(&dont_cares).copied().collect();
    let primes = prime_implicants(&all, n);

    // Coverage chart: required index -> primes covering it.
    let chart: BTreeMap<u64, Vec<usize>> = required
        .iter()
        .map(|&m| (m, (0..primes.len()).filter(|&p| primes[p].covers(m)).collect()))
        .collect();

    let mut selected: BTreeSet<usize> = BTreeSet::new();
    let mut uncovered: BTreeSet<u64> = required.clone();

    for covering in chart.values() {
        if let [p] = covering.as_slice() {
            if selected.insert(*p) {
                debug!("minimize: essential prime {}", primes[*p]);
            }
        }
    }
    for &p in selected.iter() {
        uncovered.retain(|&m| !primes[p].covers(m));
    }

    while !uncovered.is_empty() {
        let best = (0..primes.len())
            .filter(|p| !selected.contains(p))
            .map(|p| (uncovered.iter().filter(|&&m| primes[p].covers(m)).count(), p))
            .max_by(|(ca, pa), (cb, pb)| ca.cmp(cb).then(pb.cmp(pa)));
        match best {
            Some((count, p)) if count > 0 => {
                debug!("minimize: greedy prime {} covers {} more", primes[p], count);
                selected.insert(p);
                uncovered.retain(|&m| !primes[p].covers(m));
            }
            _ => break,
        }
    }

    selected.into_iter().map(|p| primes[p].clone()).collect()
}

pub fn minimize_sop_expression<S: AsRef<str>>(minterms: &[u64], dont_cares: &[u64], vars: &[S]) -> Expression {
    let cover = minimize(minterms, dont_cares, vars.len());
    if cover.is_empty() {
        return Expression::Const(false);
    }
    if cover.iter().any(Implicant::is_universal) {
        return Expression::Const(true);
    }
    Expression::Sop(cover.iter().map(|i| product_term(i, vars)).collect()).normalized()
}

pub fn minimize_pos_expression<S: AsRef<str>>(maxterms: &[u64], dont_cares: &[u64], vars: &[S]) -> Expression {
    let cover = minimize(maxterms, dont_cares, vars.len());
    if cover.is_empty() {
        return Expression::Const(true);
    }
    if cover.iter().any(Implicant::is_universal) {
        return Expression::Const(false);
    }
    Expression::Pos(cover.iter().map(|i| sum_term(i, vars)).collect()).normalized()
}

/// Minimized SOP of the function that is 1 exactly on `minterms`.
pub fn minimize_sop<S: AsRef<str>>(minterms: &[u64], vars: &[S]) -> String {
    minimize_sop_expression(minterms, &[], vars).to_string()
}

/// Minimized POS of the function that is 0 exactly on `maxterms`.
pub fn minimize_pos<S: AsRef<str>>(maxterms: &[u64], vars: &[S]) -> String {
    minimize_pos_expression(maxterms, &[], vars).to_string()
}

pub fn minimize_sop_with_dont_cares<S: AsRef<str>>(minterms: &[u64], dont_cares: &[u64], vars: &[S]) -> String {
    minimize_sop_expression(minterms, dont_cares, vars).to_string()
}

pub fn minimize_pos_with_dont_cares<S: AsRef<str>>(maxterms: &[u64], dont_cares: &[u64], vars: &[S]) -> String {
    minimize_pos_expression(maxterms, dont_cares, vars).to_string()
}
