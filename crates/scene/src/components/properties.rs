/// Editor capability flags attached to an entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentProperties {
    /// Entities flagged `no_edit` are never selected by the editor.
    pub no_edit: bool,
}

impl ComponentProperties {
    pub fn no_edit() -> Self {
        Self { no_edit: true }
    }
}
