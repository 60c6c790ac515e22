//! Normalization of generated expressions.
//!
//! Aliased labels can put the same variable twice into one term, or repeat a
//! whole term. Normalizing sorts and deduplicates the literals of every term,
//! drops repeated terms (keeping the first occurrence), and for POS removes
//! every sum that contains all literals of another sum.
//!
//! Normalizing is idempotent.
//!
//! ```
//! use logic_rs::normalize::normalize;
//!
//! assert_eq!(normalize("B·A·B + C + A·B").unwrap(), "A·B + C");
//! assert_eq!(normalize("(A + B + C)(B + A)").unwrap(), "(A + B)");
//! ```

use crate::error::AnalysisError;
use crate::expr::{Expression, Term};

/// Parses, normalizes and prints an expression.
pub fn normalize(text: &str) -> Result<String, AnalysisError> {
    Ok(Expression::parse(text)?.normalized().to_string())
}

impl Term {
    /// Sorts literals by name (plain before complemented) and drops repeats.
    fn normalize(&mut self) {
        self.literals.sort();
        self.literals.dedup();
    }

    /// Every literal of `self` also appears in `other`. Both must be normalized.
    fn is_subset_of(&self, other: &Term) -> bool {
        self.literals.iter().all(|l| other.literals.binary_search(l).is_ok())
    }
}

impl Expression {
    pub fn normalized(self) -> Self {
        match self {
            Expression::Const(b) => Expression::Const(b),
            Expression::Sop(terms) => match dedup_terms(terms) {
                terms if terms.is_empty() => Expression::Const(false),
                terms => Expression::Sop(terms),
            },
            Expression::Pos(terms) => match absorb(dedup_terms(terms)) {
                terms if terms.is_empty() => Expression::Const(true),
                terms => Expression::Pos(terms),
            },
        }
    }
}

fn dedup_terms(terms: Vec<Term>) -> Vec<Term> {
    let mut result: Vec<Term> = Vec::with_capacity(terms.len());
    for mut term in terms {
        term.normalize();
        if !result.contains(&term) {
            result.push(term);
        }
    }
    result
}

/// Drops every term whose literals include all literals of some other term.
fn absorb(terms: Vec<Term>) -> Vec<Term> {
    let keep: Vec<bool> = terms
        .iter()
        .enumerate()
        .map(|(i, t)| !terms.iter().enumerate().any(|(j, u)| i != j && u.is_subset_of(t)))
        .collect();
    terms
        .into_iter()
        .zip(keep)
        .filter_map(|(t, k)| k.then_some(t))
        .collect()
}
