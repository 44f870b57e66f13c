use crate::models::{LocationType, ModelId, SearchMode};

/// Per-session search selections. Mutated only by explicit toggle actions;
/// the mode, the location type, and the two model slots are independent, so
/// switching mode never resets what the other mode had selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    mode: SearchMode,
    location_type: LocationType,
    model_for_name: ModelId,
    model_for_preferences: ModelId,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            mode: SearchMode::ByName,
            location_type: LocationType::City,
            model_for_name: ModelId::default(),
            model_for_preferences: ModelId::default(),
        }
    }
}

impl SearchState {
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn location_type(&self) -> LocationType {
        self.location_type
    }

    pub fn model_for_name(&self) -> ModelId {
        self.model_for_name
    }

    pub fn model_for_preferences(&self) -> ModelId {
        self.model_for_preferences
    }

    /// Model selected for whichever mode is currently active.
    pub fn active_model(&self) -> ModelId {
        match self.mode {
            SearchMode::ByName => self.model_for_name,
            SearchMode::ByPreferences => self.model_for_preferences,
        }
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn set_location_type(&mut self, location_type: LocationType) {
        self.location_type = location_type;
    }

    /// Stores the selection for the given mode without touching the other
    /// mode's slot.
    pub fn select_model(&mut self, mode: SearchMode, model: ModelId) {
        match mode {
            SearchMode::ByName => self.model_for_name = model,
            SearchMode::ByPreferences => self.model_for_preferences = model,
        }
    }
}
