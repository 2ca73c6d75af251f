use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`ValueSelector`] which first tries the lower bound of the domain, i.e. decides
/// `x <= min` with `x >= min + 1` as the alternative.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMin;

impl ValueSelector for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        Decision::LessOrEqual {
            domain: decision_variable,
            value: context.lower_bound(decision_variable),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::basic_types::Interval;

    #[test]
    fn lower_bound_is_tried_first() {
        let domains = [Interval::new(-3, 8)];
        let mut rng = SmallRng::seed_from_u64(0);
        let mut context = SelectionContext::new(&domains, &mut rng);

        let decision = InDomainMin.select_value(&mut context, DomainId::new(0));

        assert_eq!(
            decision,
            Decision::LessOrEqual {
                domain: DomainId::new(0),
                value: -3
            }
        );
    }
}
