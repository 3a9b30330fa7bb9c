//! Auxiliary-boolean linearization helpers.
//!
//! `cp_sat`'s builder only exposes linear constraints (`add_le`/`add_ge`/
//! `add_eq`) and arithmetic on [`LinearExpr`] — there is no
//! `only_enforce_if`/`add_bool_and` surface in evidence, so AND/OR are
//! built as a fresh bool var pinned by a small system of linear
//! inequalities, the same way this crate's absolute-deviation variables
//! are built in `objective.rs`.

use cp_sat::builder::{BoolVar, CpModelBuilder, LinearExpr};

/// `aux <-> a & b`, via the standard three-inequality linearization:
/// `aux <= a`, `aux <= b`, `aux >= a + b - 1`.
pub fn and_aux(model: &mut CpModelBuilder, a: &BoolVar, b: &BoolVar) -> BoolVar {
    let aux = model.new_bool_var();
    model.add_le(LinearExpr::from(aux.clone()), LinearExpr::from(a.clone()));
    model.add_le(LinearExpr::from(aux.clone()), LinearExpr::from(b.clone()));
    model.add_ge(
        LinearExpr::from(aux.clone()),
        LinearExpr::from(a.clone()) + LinearExpr::from(b.clone()) - 1,
    );
    aux
}

/// `aux <-> OR(vars)`, via `aux >= v` for every `v` and `aux <= sum(vars)`.
/// Returns a constant `false`-equivalent (a bool var fixed to 0) when
/// `vars` is empty, since an empty disjunction is vacuously false.
pub fn or_aux(model: &mut CpModelBuilder, vars: &[BoolVar]) -> BoolVar {
    let aux = model.new_bool_var();
    if vars.is_empty() {
        model.add_eq(LinearExpr::from(aux.clone()), LinearExpr::from(0));
        return aux;
    }
    let mut sum = LinearExpr::from(0);
    for v in vars {
        model.add_ge(LinearExpr::from(aux.clone()), LinearExpr::from(v.clone()));
        sum = sum + LinearExpr::from(v.clone());
    }
    model.add_le(LinearExpr::from(aux.clone()), sum);
    aux
}

/// Folds [`and_aux`] over more than two terms. Returns `None` for an empty
/// slice (an empty conjunction has no natural bool-var representation here
/// — callers should special-case it before reaching for this helper).
pub fn and_aux_many(model: &mut CpModelBuilder, vars: &[BoolVar]) -> Option<BoolVar> {
    let mut iter = vars.iter();
    let first = iter.next()?.clone();
    Some(iter.fold(first, |acc, v| and_aux(model, &acc, v)))
}

/// `aux <-> ¬a`, i.e. `aux + a == 1`.
pub fn not_aux(model: &mut CpModelBuilder, a: &BoolVar) -> BoolVar {
    let aux = model.new_bool_var();
    model.add_eq(
        LinearExpr::from(aux.clone()) + LinearExpr::from(a.clone()),
        LinearExpr::from(1),
    );
    aux
}

/// `a -> b`, i.e. `a <= b`.
pub fn implies(model: &mut CpModelBuilder, a: &BoolVar, b: &BoolVar) {
    model.add_le(LinearExpr::from(a.clone()), LinearExpr::from(b.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_sat::proto::{CpSolverStatus, SatParameters};

    fn solve(model: &mut CpModelBuilder) -> cp_sat::proto::CpSolverResponse {
        let mut params = SatParameters::default();
        params.max_time_in_seconds = Some(5.0);
        model.solve_with_parameters(&params)
    }

    #[test]
    fn and_aux_matches_conjunction_on_every_fixed_input() {
        for &(av, bv) in &[(0, 0), (0, 1), (1, 0), (1, 1)] {
            let mut model = CpModelBuilder::default();
            let a = model.new_bool_var();
            let b = model.new_bool_var();
            model.add_eq(LinearExpr::from(a.clone()), LinearExpr::from(av));
            model.add_eq(LinearExpr::from(b.clone()), LinearExpr::from(bv));
            let aux = and_aux(&mut model, &a, &b);
            let response = solve(&mut model);
            assert_eq!(response.status(), CpSolverStatus::Optimal);
            assert_eq!(aux.solution_value(&response), av == 1 && bv == 1);
        }
    }

    #[test]
    fn or_aux_of_empty_slice_is_false() {
        let mut model = CpModelBuilder::default();
        let aux = or_aux(&mut model, &[]);
        let response = solve(&mut model);
        assert!(!aux.solution_value(&response));
    }

    #[test]
    fn or_aux_matches_disjunction() {
        let mut model = CpModelBuilder::default();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        let c = model.new_bool_var();
        model.add_eq(LinearExpr::from(a.clone()), LinearExpr::from(0));
        model.add_eq(LinearExpr::from(b.clone()), LinearExpr::from(1));
        model.add_eq(LinearExpr::from(c.clone()), LinearExpr::from(0));
        let aux = or_aux(&mut model, &[a, b, c]);
        let response = solve(&mut model);
        assert!(aux.solution_value(&response));
    }

    #[test]
    fn not_aux_negates() {
        let mut model = CpModelBuilder::default();
        let a = model.new_bool_var();
        model.add_eq(LinearExpr::from(a.clone()), LinearExpr::from(1));
        let aux = not_aux(&mut model, &a);
        let response = solve(&mut model);
        assert!(!aux.solution_value(&response));
    }

    #[test]
    fn implies_forbids_true_then_false() {
        let mut model = CpModelBuilder::default();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        implies(&mut model, &a, &b);
        model.add_eq(LinearExpr::from(a.clone()), LinearExpr::from(1));
        model.add_eq(LinearExpr::from(b.clone()), LinearExpr::from(0));
        let response = solve(&mut model);
        assert_eq!(response.status(), CpSolverStatus::Infeasible);
    }
}
