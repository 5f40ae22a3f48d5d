use serde::{Deserialize, Serialize};

use crate::model::ids::OptionId;

/// A candidate answer as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    option: OptionId,
    text: String,
}

impl Answer {
    #[must_use]
    pub fn new(option: impl Into<OptionId>, text: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn option(&self) -> &OptionId {
        &self.option
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
