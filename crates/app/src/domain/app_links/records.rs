//! Application Link Records

use crate::ids::TypedId;

/// Application Link ID
pub type AppLinkId = TypedId<AppLinkRecord>;

/// Application Link Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLinkRecord {
    pub id: AppLinkId,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}
