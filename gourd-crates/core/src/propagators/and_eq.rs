use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;

/// Propagates `r <-> (b_0 /\ ... /\ b_{n-1})` over 0/1 variables, with `r` the last variable.
pub(crate) fn compute(bounds: &mut [Interval], _parameters: &[i32]) -> PropagationStatus {
    let Some((result, conjuncts)) = bounds.split_last_mut() else {
        return PropagationStatus::Entailed;
    };

    if conjuncts.iter().any(|b| b.max <= 0) {
        let _ = result.tighten_max(0);
    } else if conjuncts.iter().all(|b| b.min >= 1) {
        let _ = result.tighten_min(1);
    }

    if result.is_empty() {
        return PropagationStatus::Inconsistent;
    }

    if result.min >= 1 {
        for conjunct in conjuncts.iter_mut() {
            let _ = conjunct.tighten_min(1);
        }
        return PropagationStatus::Entailed;
    }

    if result.max <= 0 {
        if conjuncts.iter().any(|b| b.max <= 0) {
            return PropagationStatus::Entailed;
        }

        // Every conjunct can still be true; if only one can be false, it has to be.
        let mut can_be_false = conjuncts.iter_mut().filter(|b| b.min <= 0);
        return match (can_be_false.next(), can_be_false.next()) {
            (None, _) => PropagationStatus::Inconsistent,
            (Some(conjunct), None) => {
                let _ = conjunct.tighten_max(0);
                PropagationStatus::Entailed
            }
            (Some(_), Some(_)) => PropagationStatus::Consistent,
        };
    }

    PropagationStatus::Consistent
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNFIXED: Interval = Interval::new(0, 1);
    const FALSE: Interval = Interval::new(0, 0);
    const TRUE: Interval = Interval::new(1, 1);

    #[test]
    fn false_conjunct_falsifies_the_result() {
        let mut bounds = vec![UNFIXED, FALSE, UNFIXED];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Entailed);
        assert_eq!(bounds, vec![UNFIXED, FALSE, FALSE]);
    }

    #[test]
    fn true_result_makes_every_conjunct_true() {
        let mut bounds = vec![UNFIXED, UNFIXED, TRUE];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Entailed);
        assert_eq!(bounds, vec![TRUE, TRUE, TRUE]);
    }

    #[test]
    fn false_result_with_one_open_conjunct_falsifies_it() {
        let mut bounds = vec![TRUE, UNFIXED, TRUE, FALSE];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Entailed);
        assert_eq!(bounds, vec![TRUE, FALSE, TRUE, FALSE]);
    }

    #[test]
    fn false_result_with_true_conjuncts_is_inconsistent() {
        let mut bounds = vec![TRUE, TRUE, FALSE];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Inconsistent);
    }

    #[test]
    fn open_conjuncts_leave_the_result_open() {
        let mut bounds = vec![TRUE, UNFIXED, UNFIXED];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Consistent);
        assert_eq!(bounds, vec![TRUE, UNFIXED, UNFIXED]);
    }
}
