use serde::{Deserialize, Serialize};

/// Running chips and mult for a single scoring event.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub chips: i64,
    pub mult: f64,
}

impl Score {
    pub fn new(chips: i64, mult: f64) -> Self {
        Self { chips, mult }
    }

    pub fn total_raw(&self) -> f64 {
        self.chips as f64 * self.mult
    }

    pub fn total(&self) -> i64 {
        self.total_raw().floor() as i64
    }

    pub fn add_chips(&mut self, amount: i64) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub fn apply_chip_transform<F>(&mut self, f: F)
    where
        F: FnOnce(i64) -> i64,
    {
        self.chips = f(self.chips);
    }

    pub fn apply_mult_transform<F>(&mut self, f: F)
    where
        F: FnOnce(f64) -> f64,
    {
        self.mult = f(self.mult);
    }

    pub fn apply(&mut self, effect: &RuleEffect) {
        match *effect {
            RuleEffect::AddChips(value) => self.add_chips(value),
            RuleEffect::MultiplyChips(value) => {
                self.apply_chip_transform(|chips| (chips as f64 * value).floor() as i64)
            }
            RuleEffect::AddMult(value) => self.apply_mult_transform(|mult| mult + value),
            RuleEffect::MultiplyMult(value) => self.apply_mult_transform(|mult| mult * value),
            RuleEffect::TransformChips(f) => self.apply_chip_transform(f),
            RuleEffect::TransformMult(f) => self.apply_mult_transform(f),
        }
    }
}

/// One contribution to a [`Score`].
///
/// The transform variants carry plain function pointers so effects stay
/// `Copy` and free of captured state. They cannot be serialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum RuleEffect {
    AddChips(i64),
    MultiplyChips(f64),
    AddMult(f64),
    MultiplyMult(f64),
    #[serde(skip)]
    TransformChips(fn(i64) -> i64),
    #[serde(skip)]
    TransformMult(fn(f64) -> f64),
}

/// One recorded change to the score. Abilities that mutate the score
/// directly leave `effect` empty.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreTraceStep {
    pub source: String,
    pub effect: Option<RuleEffect>,
    pub before: Score,
    pub after: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_floors_fractional_mult() {
        let score = Score::new(15, 1.5);
        assert_eq!(score.total_raw(), 22.5);
        assert_eq!(score.total(), 22);
    }

    #[test]
    fn apply_dispatches_each_op() {
        let mut score = Score::new(10, 2.0);
        score.apply(&RuleEffect::AddChips(5));
        assert_eq!(score.chips, 15);
        score.apply(&RuleEffect::MultiplyChips(1.5));
        assert_eq!(score.chips, 22);
        score.apply(&RuleEffect::AddMult(3.0));
        assert_eq!(score.mult, 5.0);
        score.apply(&RuleEffect::MultiplyMult(2.0));
        assert_eq!(score.mult, 10.0);
        score.apply(&RuleEffect::TransformChips(|chips| chips - 2));
        assert_eq!(score.chips, 20);
        score.apply(&RuleEffect::TransformMult(|mult| mult.sqrt()));
        assert!((score.mult - 10f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn add_chips_saturates_instead_of_overflowing() {
        let mut score = Score::new(i64::MAX - 10, 1.0);
        score.apply(&RuleEffect::AddChips(1_000));
        assert_eq!(score.chips, i64::MAX);
        score.add_chips(i64::MIN);
        assert_eq!(score.chips, -1);
    }

    #[test]
    fn non_commuting_steps_diverge_by_order() {
        let mut add_first = Score::new(10, 2.0);
        add_first.add_chips(5);
        add_first.apply_chip_transform(|chips| chips * 2);

        let mut scale_first = Score::new(10, 2.0);
        scale_first.apply_chip_transform(|chips| chips * 2);
        scale_first.add_chips(5);

        assert_eq!(add_first.chips, 30);
        assert_eq!(scale_first.chips, 25);
        assert_ne!(add_first, scale_first);
    }

    #[test]
    fn data_effects_round_trip_through_json() {
        let effect = RuleEffect::MultiplyMult(1.5);
        let text = serde_json::to_string(&effect).expect("serialize");
        let back: RuleEffect = serde_json::from_str(&text).expect("deserialize");
        assert!(matches!(back, RuleEffect::MultiplyMult(v) if v == 1.5));
    }

    #[test]
    fn transform_effects_refuse_serialization() {
        let effect = RuleEffect::TransformChips(|chips| chips);
        assert!(serde_json::to_string(&effect).is_err());
    }
}
