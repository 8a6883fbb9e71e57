use uuid::Uuid;

/// Which menu group and category are expanded.
///
/// Opening a group always collapses whatever category was open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionState {
    pub open_group: Option<Uuid>,
    pub open_category: Option<Uuid>,
}

impl ExpansionState {
    pub fn toggle_group(&mut self, group: Uuid) {
        self.open_group = if self.open_group == Some(group) {
            None
        } else {
            Some(group)
        };
        self.open_category = None;
    }

    pub fn toggle_category(&mut self, category: Uuid) {
        self.open_category = if self.open_category == Some(category) {
            None
        } else {
            Some(category)
        };
    }

    /// Link followed or menu closed
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_group_open(&self, group: Uuid) -> bool {
        self.open_group == Some(group)
    }

    pub fn is_category_open(&self, category: Uuid) -> bool {
        self.open_category == Some(category)
    }
}
