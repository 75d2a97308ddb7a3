use serde::{Deserialize, Serialize};

/// Prediction models the backend can run.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionOption {
    Modelo1,
    Modelo2,
    Modelo3,
    Modelo4,
    Modelo5,
}

impl PredictionOption {
    pub const ALL: [PredictionOption; 5] = [
        PredictionOption::Modelo1,
        PredictionOption::Modelo2,
        PredictionOption::Modelo3,
        PredictionOption::Modelo4,
        PredictionOption::Modelo5,
    ];

    /// Identifier sent to the backend.
    pub fn id(&self) -> &'static str {
        match self {
            PredictionOption::Modelo1 => "modelo1",
            PredictionOption::Modelo2 => "modelo2",
            PredictionOption::Modelo3 => "modelo3",
            PredictionOption::Modelo4 => "modelo4",
            PredictionOption::Modelo5 => "modelo5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PredictionOption::Modelo1 => "Modelo1 placeholder",
            PredictionOption::Modelo2 => "Modelo2 placeholder",
            PredictionOption::Modelo3 => "Modelo3 placeholder",
            PredictionOption::Modelo4 => "Modelo4 placeholder",
            PredictionOption::Modelo5 => "Modelo5 placeholder",
        }
    }
}

impl std::fmt::Display for PredictionOption {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Checked options, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSelection {
    selected: Vec<PredictionOption>,
}

impl OptionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the option if unchecked, uncheck it otherwise.
    pub fn toggle(&mut self, option: PredictionOption) {
        match self.selected.iter().position(|o| *o == option) {
            Some(pos) => {
                self.selected.remove(pos);
            }
            None => self.selected.push(option),
        }
    }

    /// Check the option; already checked options are left alone.
    pub fn select(&mut self, option: PredictionOption) {
        if !self.is_selected(option) {
            self.selected.push(option);
        }
    }

    pub fn is_selected(&self, option: PredictionOption) -> bool {
        self.selected.contains(&option)
    }

    pub fn options(&self) -> &[PredictionOption] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether a submission may start.
    pub fn can_process(&self, document_count: usize, is_processing: bool) -> bool {
        document_count > 0 && !is_processing && !self.selected.is_empty()
    }
}

impl FromIterator<PredictionOption> for OptionSelection {
    fn from_iter<I: IntoIterator<Item = PredictionOption>>(iter: I) -> Self {
        let mut selection = Self::new();
        iter.into_iter().for_each(|o| selection.select(o));
        selection
    }
}
