use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: i64,          // ⇔ projects.id (INTEGER PRIMARY KEY AUTOINCREMENT)
    pub name: String,     // ⇔ projects.name (UNIQUE, non-empty)
    pub is_active: bool,  // ⇔ projects.is_active (BOOLEAN DEFAULT 1)
}

impl Project {
    pub fn status_label(&self) -> &'static str {
        if self.is_active { "active" } else { "inactive" }
    }
}
