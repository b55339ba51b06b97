use serde::Deserialize;

pub const DEFAULT_DISTRIBUTION_TRIALS: i64 = 100;
pub const DEFAULT_DICE_SUM_TRIALS: i64 = 150_000;
pub const DEFAULT_DICE_SUM_DICES: i64 = 200;

///
/// Request body for the single-parameter simulations
///
#[derive(Debug, Default, Deserialize)]
pub struct TrialsModel {
    pub trials: Option<i64>,
}

///
/// Request body for the dice-sum simulations
///
#[derive(Debug, Default, Deserialize)]
pub struct TrialsDicesModel {
    pub trials: Option<i64>,
    pub dices: Option<i64>,
}

impl TrialsDicesModel {
    pub fn trials_or_default(&self) -> i64 {
        self.trials.unwrap_or(DEFAULT_DICE_SUM_TRIALS)
    }

    pub fn dices_or_default(&self) -> i64 {
        self.dices.unwrap_or(DEFAULT_DICE_SUM_DICES)
    }
}
