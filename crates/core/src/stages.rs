//! Deal stage vocabulary: internal pipeline-stage codes and their
//! human-facing labels.
//!
//! Free-text resolution is a case-insensitive containment check in either
//! direction; the first match in declaration order wins. Unresolved text
//! passes through unchanged and is treated as a literal filter value by
//! callers.

const DEAL_STAGES: &[(&str, &str)] = &[
    ("appointmentscheduled", "Appointment Scheduled"),
    ("qualifiedtobuy", "Qualified to Buy"),
    ("presentationscheduled", "Presentation Scheduled"),
    ("decisionmakerboughtin", "Decision Maker Bought-In"),
    ("contractsent", "Contract Sent"),
    ("closedwon", "Closed Won"),
    ("closedlost", "Closed Lost"),
];

#[derive(Clone, Copy, Debug)]
pub struct StageVocabulary {
    stages: &'static [(&'static str, &'static str)],
}

impl Default for StageVocabulary {
    fn default() -> Self {
        Self { stages: DEAL_STAGES }
    }
}

impl StageVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a free-text stage reference to its internal code.
    /// Unmatched text comes back unchanged.
    pub fn code_for<'a>(&self, free_text: &'a str) -> &'a str {
        let needle = free_text.to_lowercase();
        for (code, label) in self.stages {
            let label_lower = label.to_lowercase();
            if label_lower.contains(&needle) || needle.contains(&label_lower) {
                return code;
            }
        }
        free_text
    }

    /// Display label for an internal stage code, if the code is known.
    pub fn label_for(&self, code: &str) -> Option<&'static str> {
        self.stages
            .iter()
            .find(|(known_code, _)| *known_code == code)
            .map(|(_, label)| *label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|(_, label)| *label)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.stages.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::StageVocabulary;

    #[test]
    fn every_label_round_trips_to_its_code() {
        let vocabulary = StageVocabulary::new();
        for (code, label) in vocabulary.pairs() {
            assert_eq!(vocabulary.code_for(label), code);
            assert_eq!(vocabulary.code_for(&label.to_uppercase()), code);
            assert_eq!(vocabulary.code_for(&label.to_lowercase()), code);
            assert_eq!(vocabulary.label_for(code), Some(label));
        }
    }

    #[test]
    fn partial_label_text_resolves() {
        let vocabulary = StageVocabulary::new();
        assert_eq!(vocabulary.code_for("contract sent stage is fine"), "contractsent");
        assert_eq!(vocabulary.code_for("Qualified"), "qualifiedtobuy");
    }

    #[test]
    fn ambiguous_text_takes_first_declared_match() {
        let vocabulary = StageVocabulary::new();
        // "Scheduled" is contained in two labels; declaration order decides.
        assert_eq!(vocabulary.code_for("Scheduled"), "appointmentscheduled");
        // "Closed" likewise.
        assert_eq!(vocabulary.code_for("closed"), "closedwon");
    }

    #[test]
    fn unresolved_text_passes_through() {
        let vocabulary = StageVocabulary::new();
        assert_eq!(vocabulary.code_for("negotiation"), "negotiation");
        assert_eq!(vocabulary.label_for("negotiation"), None);
    }
}
