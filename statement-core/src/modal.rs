//! Label dialog for a single transaction row

use crate::transaction::RowKey;

/// Label dialog state.
///
/// `generation` is the list generation the target row belongs to; a row key
/// means nothing once the list has been replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelModal {
    #[default]
    Closed,
    Editing {
        target: RowKey,
        generation: u64,
        draft: String,
    },
}

impl LabelModal {
    /// Open the dialog on `target`, seeding the draft with its current label.
    pub fn open(&mut self, target: RowKey, generation: u64, current_label: String) {
        *self = LabelModal::Editing {
            target,
            generation,
            draft: current_label,
        };
    }

    /// Close without side effects.
    pub fn cancel(&mut self) {
        *self = LabelModal::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, LabelModal::Editing { .. })
    }

    pub fn target(&self) -> Option<RowKey> {
        match self {
            LabelModal::Editing { target, .. } => Some(*target),
            LabelModal::Closed => None,
        }
    }

    /// List generation the dialog was opened against.
    pub fn generation(&self) -> Option<u64> {
        match self {
            LabelModal::Editing { generation, .. } => Some(*generation),
            LabelModal::Closed => None,
        }
    }

    pub fn draft(&self) -> &str {
        match self {
            LabelModal::Editing { draft, .. } => draft,
            LabelModal::Closed => "",
        }
    }

    pub fn set_draft(&mut self, text: &str) {
        if let LabelModal::Editing { draft, .. } = self {
            *draft = text.to_string();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let LabelModal::Editing { draft, .. } = self {
            draft.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let LabelModal::Editing { draft, .. } = self {
            draft.pop();
        }
    }

    pub fn clear_draft(&mut self) {
        self.set_draft("");
    }
}
