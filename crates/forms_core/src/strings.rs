//! Button and caption labels as an explicit configuration value passed to
//! the dialog host, instead of a global localization container.

use crate::outcome::DialogOutcome;
use crate::schema::EditMode;

#[derive(Debug, Clone)]
pub struct DialogStrings {
    pub ok: String,
    pub cancel: String,
    pub yes: String,
    pub no: String,
    pub abort: String,
    pub retry: String,
    pub ignore: String,
    pub save: String,
    pub add: String,
    pub error_caption: String,
}

impl Default for DialogStrings {
    fn default() -> Self {
        Self {
            ok: "OK".to_string(),
            cancel: "Cancel".to_string(),
            yes: "Yes".to_string(),
            no: "No".to_string(),
            abort: "Abort".to_string(),
            retry: "Retry".to_string(),
            ignore: "Ignore".to_string(),
            save: "Save".to_string(),
            add: "Add".to_string(),
            error_caption: "Error".to_string(),
        }
    }
}

impl DialogStrings {
    pub fn button_label(&self, outcome: DialogOutcome) -> &str {
        match outcome {
            DialogOutcome::Ok => &self.ok,
            DialogOutcome::Cancel => &self.cancel,
            DialogOutcome::Yes => &self.yes,
            DialogOutcome::No => &self.no,
            DialogOutcome::Abort => &self.abort,
            DialogOutcome::Retry => &self.retry,
            DialogOutcome::Ignore => &self.ignore,
            // a closed window is not a button
            DialogOutcome::None => "",
        }
    }

    /// Submit button label per mode; View forms have none.
    pub fn submit_label(&self, mode: EditMode) -> Option<&str> {
        match mode {
            EditMode::View => None,
            EditMode::Add => Some(&self.add),
            EditMode::Edit => Some(&self.save),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_label_follows_the_mode() {
        let strings = DialogStrings::default();
        assert_eq!(strings.submit_label(EditMode::View), None);
        assert_eq!(strings.submit_label(EditMode::Add), Some("Add"));
        assert_eq!(strings.submit_label(EditMode::Edit), Some("Save"));
    }
}
