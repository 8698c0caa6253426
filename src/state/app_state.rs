use crate::args::Pick;
use ncaa_predictor::{Bracket, DataWarning, Prediction};

// ---------------------------------------------------------------------------
// Bracket state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct BracketState {
    pub bracket: Bracket,
    /// Gaps found while loading and seeding the field.
    pub warnings: Vec<DataWarning>,
    /// Manual winners in the order they were applied.
    pub picks: Vec<Pick>,
}

impl BracketState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub bracket: BracketState,
    pub last_prediction: Option<Prediction>,
}
