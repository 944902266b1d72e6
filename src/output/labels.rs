//! Display labels for taxonomy category keys

const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("programming_languages", "Programming Languages"),
    ("frameworks_libraries", "Frameworks & Libraries"),
    ("web_technologies", "Web Technologies"),
    ("api_technologies", "APIs"),
    ("databases_relational", "Relational Databases"),
    ("databases_nonrelational", "NoSQL Databases"),
    ("databases_timeseries", "Time-Series Databases"),
    ("data_engineering", "Data Engineering"),
    ("data_science_ml", "Data Science & ML"),
    ("messaging_eventing", "Messaging & Eventing"),
    ("cloud_platforms", "Cloud Platforms"),
    ("containerization_orchestration", "Containers & Orchestration"),
    ("infrastructure_as_code", "Infrastructure as Code"),
    ("ci_cd_tooling", "CI/CD Tooling"),
    ("version_control", "Version Control"),
    ("observability_tooling", "Observability & Monitoring"),
    ("security", "Security"),
    ("qa_testing", "QA & Testing"),
    ("mobile_ios", "Mobile · iOS"),
    ("mobile_android", "Mobile · Android"),
    ("mobile_crossplatform", "Mobile · Cross-platform"),
    ("ui_ux", "UI/UX"),
    ("it_support", "IT Support"),
    ("sysadmin_linux", "SysAdmin · Linux"),
    ("sysadmin_windows", "SysAdmin · Windows"),
    ("networking", "Networking"),
    ("customer_support_tools", "Customer Support Tools"),
    ("project_methodologies", "Project Methodologies"),
];

/// Words that keep a fixed spelling when title-casing unknown keys.
const ACRONYMS: &[(&str, &str)] = &[
    ("api", "APIs"),
    ("ui", "UI"),
    ("ux", "UX"),
    ("ci", "CI"),
    ("cd", "CD"),
    ("ios", "iOS"),
    ("qa", "QA"),
    ("ml", "ML"),
    ("it", "IT"),
];

/// Pretty label for a category key. Unknown keys are title-cased with
/// underscores and hyphens turned into spaces.
pub fn display_category(key: &str) -> String {
    let key = key.trim().to_lowercase();
    if key.is_empty() {
        return String::new();
    }
    if let Some((_, label)) = CATEGORY_LABELS.iter().find(|(k, _)| *k == key) {
        return label.to_string();
    }

    let words: Vec<String> = key
        .split(|c: char| c == '_' || c == '-' || c == ' ')
        .filter(|w| !w.is_empty())
        .map(title_word)
        .collect();

    let label = words.join(" ");
    label.replace("UI UX", "UI/UX").replace("CI CD", "CI/CD")
}

fn title_word(word: &str) -> String {
    if let Some((_, fixed)) = ACRONYMS.iter().find(|(w, _)| *w == word) {
        return fixed.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
