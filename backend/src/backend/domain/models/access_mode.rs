/// Capability of whoever is editing a claim.
///
/// Decided outside the engine by checking the admin secret and passed in
/// with every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    Admin,
    #[default]
    Staff,
}

impl AccessMode {
    pub fn is_admin(self) -> bool {
        matches!(self, AccessMode::Admin)
    }
}
