/// Ordered folder-name keyword table; the first matching row wins
const ICON_TABLE: &[(&[&str], &str)] = &[
    (&["time"], "fas fa-clock"),
    (&["weather"], "fas fa-cloud-sun"),
    (&["database", "db"], "fas fa-database"),
    (&["api"], "fas fa-plug"),
    (&["file"], "fas fa-file"),
    (&["web", "http"], "fas fa-globe"),
    (&["git"], "fab fa-git-alt"),
    (&["mail", "email"], "fas fa-envelope"),
    (&["chat", "message"], "fas fa-comment"),
    (&["search"], "fas fa-search"),
];

pub const FALLBACK_ICON: &str = "fas fa-server";

/// Icon class for a server folder, matched case-insensitively by substring
pub fn default_icon(folder: &str) -> &'static str {
    let name = folder.to_lowercase();
    ICON_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}
