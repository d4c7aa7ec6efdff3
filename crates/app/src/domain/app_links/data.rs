//! Application Link Data

/// New Application Link Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppLink {
    pub name: String,
    pub url: String,
    pub icon: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl NewAppLink {
    fn active(name: &str, url: &str, icon: &str, description: &str, sort_order: i32) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
            description: Some(description.to_string()),
            is_active: true,
            sort_order,
        }
    }
}

/// Links seeded into an empty store.
#[must_use]
pub fn default_app_links() -> Vec<NewAppLink> {
    vec![
        NewAppLink::active(
            "Document Manager",
            "https://docs.example.com",
            "file",
            "Access and manage company documents",
            1,
        ),
        NewAppLink::active(
            "Resource Scheduler",
            "https://scheduler.example.com",
            "calendar",
            "Schedule and manage resources",
            2,
        ),
        NewAppLink::active(
            "Project Portal",
            "https://projects.example.com",
            "project-diagram",
            "Track and manage projects",
            3,
        ),
    ]
}
