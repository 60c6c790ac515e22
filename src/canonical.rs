//! Canonical sum-of-products and product-of-sums forms.
//!
//! Row indices use the enumeration bit order: variable `i` is bit `n-1-i`
//! of the index (the first variable is the most significant bit).
//!
//! Polarity differs between the two forms:
//! - in a SOP minterm, a variable is plain where its bit is 1 and complemented where it is 0;
//! - in a POS maxterm, a variable is plain where its bit is 0 and complemented where it is 1.
//!
//! ```
//! use logic_rs::canonical::{pos, sop};
//!
//! let vars = ["A", "B"];
//! assert_eq!(sop(&[1, 2], &vars), "A'·B + A·B'");
//! assert_eq!(pos(&[0, 3], &vars), "(A + B)(A' + B')");
//! ```

use std::collections::BTreeSet;

use log::warn;

use crate::expr::{Expression, Literal, Term};
use crate::implicant::{Implicant, Trit};

/// Product of the non-don't-care positions: `1` gives a plain literal, `0` a complemented one.
pub fn product_term<S: AsRef<str>>(implicant: &Implicant, vars: &[S]) -> Term {
    literals(implicant, vars, Trit::Zero)
}

/// Sum of the non-don't-care positions: `0` gives a plain literal, `1` a complemented one.
pub fn sum_term<S: AsRef<str>>(implicant: &Implicant, vars: &[S]) -> Term {
    literals(implicant, vars, Trit::One)
}

fn literals<S: AsRef<str>>(implicant: &Implicant, vars: &[S], complemented_on: Trit) -> Term {
    assert_eq!(implicant.len(), vars.len(), "Implicant width does not match variable count");
    Term::new(
        implicant
            .trits()
            .iter()
            .zip(vars)
            .filter(|(t, _)| t.is_literal())
            .map(|(&t, var)| Literal::new(var.as_ref(), t == complemented_on))
            .collect(),
    )
}

/// Distinct in-range indices, ascending. Out-of-range ones are dropped with a warning.
pub(crate) fn index_set(indices: &[u64], n: usize) -> BTreeSet<u64> {
    assert!(n < 64, "At most 63 variables are supported");
    let size = 1u64 << n;
    let mut set = BTreeSet::new();
    for &index in indices {
        if index < size {
            set.insert(index);
        } else {
            warn!("ignoring index {} outside of {} variable(s)", index, n);
        }
    }
    set
}

pub fn sop_expression<S: AsRef<str>>(minterms: &[u64], vars: &[S]) -> Expression {
    let n = vars.len();
    let set = index_set(minterms, n);
    if set.is_empty() {
        return Expression::Const(false);
    }
    if set.len() as u64 == 1u64 << n {
        return Expression::Const(true);
    }
    let terms = set
        .into_iter()
        .map(|m| product_term(&Implicant::from_index(m, n), vars))
        .collect();
    Expression::Sop(terms).normalized()
}

pub fn pos_expression<S: AsRef<str>>(maxterms: &[u64], vars: &[S]) -> Expression {
    let n = vars.len();
    let set = index_set(maxterms, n);
    if set.is_empty() {
        return Expression::Const(true);
    }
    if set.len() as u64 == 1u64 << n {
        return Expression::Const(false);
    }
    let terms = set
        .into_iter()
        .map(|m| sum_term(&Implicant::from_index(m, n), vars))
        .collect();
    Expression::Pos(terms).normalized()
}

/// Canonical SOP: one product per minterm. `0` when empty, `1` when every row is a minterm.
pub fn sop<S: AsRef<str>>(minterms: &[u64], vars: &[S]) -> String {
    sop_expression(minterms, vars).to_string()
}

/// Canonical POS: one sum per maxterm. `1` when empty, `0` when every row is a maxterm.
pub fn pos<S: AsRef<str>>(maxterms: &[u64], vars: &[S]) -> String {
    pos_expression(maxterms, vars).to_string()
}
