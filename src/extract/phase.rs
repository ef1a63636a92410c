/// Reported when no phase keyword appears on the page.
pub const PHASE_UNDETERMINED: &str = "Status undetermined";

// Ordered by how far along the proceeding is; the first hit wins, so a page
// mentioning both the memorial and a rejoinder classifies as the later
// stage.
const PHASE_RULES: &[(&str, &str)] = &[
    ("rejoinder", "Rejoinder submitted"),
    ("memorial", "Pleadings phase"),
    ("pending", "Case pending"),
];

/// Classify the proceedings phase. `lower_text` must already be lowercased;
/// the caller lowercases once and shares it with the mention scans.
pub fn classify(lower_text: &str) -> String {
    for (keyword, label) in PHASE_RULES {
        if lower_text.contains(keyword) {
            return (*label).to_string();
        }
    }
    PHASE_UNDETERMINED.to_string()
}
