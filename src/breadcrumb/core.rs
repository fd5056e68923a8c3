use crate::width::{display_width, plain_text};

/// Glyph separating breadcrumb segments and modal title parts.
pub const DELIMITER: char = '⟡';

/// Delimiter with its surrounding spaces, as joined into paths.
pub const SEPARATOR: &str = " ⟡ ";

const ELLIPSIS: char = '…';

/// Stateless breadcrumb builder; the controller owns the current text.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadcrumbTracker;

impl BreadcrumbTracker {
    pub fn new() -> Self {
        Self
    }

    pub fn room_path(&self, section_label: &str, component_label: &str) -> String {
        format!(
            "{}{SEPARATOR}{}",
            plain_text(section_label).to_uppercase(),
            plain_text(component_label).to_uppercase()
        )
    }

    pub fn extend_with_modal(&self, existing: &str, modal_title: &str) -> String {
        let mut path = String::with_capacity(existing.len() + modal_title.len() + SEPARATOR.len());
        path.push_str(existing);
        path.push_str(SEPARATOR);
        path.push_str(&title_fragment(modal_title));
        path
    }
}

/// Subject part of a `CATEGORY ⟡ SUBJECT` title. Titles without the
/// delimiter yield the whole trimmed title.
pub fn title_fragment(title: &str) -> String {
    let clean = plain_text(title);
    match clean.split(DELIMITER).nth(1) {
        Some(subject) => subject.trim().to_string(),
        None => clean.trim().to_string(),
    }
}

/// Key used for deep indicators and dimming: `AI CORE` becomes `ai-core`.
pub fn section_key(section_label: &str) -> String {
    plain_text(section_label)
        .trim()
        .to_lowercase()
        .replace(' ', "-")
}

/// Shorten `path` to `max_width` columns, keeping its tail.
pub fn fit(path: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(path) <= max_width {
        return path.to_string();
    }

    let budget = max_width - 1;
    let mut kept: Vec<char> = Vec::new();
    let mut width = 0usize;
    for ch in plain_text(path).chars().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        kept.push(ch);
    }

    let mut result = String::with_capacity(kept.len() + 1);
    result.push(ELLIPSIS);
    result.extend(kept.into_iter().rev());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_path_upper_cases_labels() {
        let tracker = BreadcrumbTracker::new();
        assert_eq!(tracker.room_path("Hardware", "Processor"), "HARDWARE ⟡ PROCESSOR");
        assert_eq!(
            tracker.room_path("AI CORE", "INTERNAL LOGIC"),
            "AI CORE ⟡ INTERNAL LOGIC"
        );
    }

    #[test]
    fn modal_extends_existing_path() {
        let tracker = BreadcrumbTracker::new();
        let path = tracker.extend_with_modal("AI CORE ⟡ INTERNAL LOGIC", "AI CORE ⟡ DECISION TREE");
        assert_eq!(path, "AI CORE ⟡ INTERNAL LOGIC ⟡ DECISION TREE");
    }

    #[test]
    fn modal_from_empty_path_keeps_leading_separator() {
        let tracker = BreadcrumbTracker::new();
        assert_eq!(
            tracker.extend_with_modal("", "LAB ⟡ TEST PROTOCOLS"),
            " ⟡ TEST PROTOCOLS"
        );
    }

    #[test]
    fn title_without_delimiter_falls_back_to_full_title() {
        assert_eq!(title_fragment("  Plain Title "), "Plain Title");
    }

    #[test]
    fn only_second_segment_is_kept() {
        assert_eq!(title_fragment("A ⟡ B ⟡ C"), "B");
        assert_eq!(
            BreadcrumbTracker::new().extend_with_modal("LAB ⟡ TESTING", "LAB ⟡ RUN ⟡ 2"),
            "LAB ⟡ TESTING ⟡ RUN"
        );
    }

    #[test]
    fn section_key_slugs_label() {
        assert_eq!(section_key("AI CORE"), "ai-core");
        assert_eq!(section_key("SYSTEM"), "system");
    }

    #[test]
    fn fit_keeps_tail_segments() {
        let path = "AI CORE ⟡ INTERNAL LOGIC ⟡ DECISION TREE";
        assert_eq!(fit(path, 100), path);
        let short = fit(path, 14);
        assert_eq!(short, "…DECISION TREE");
        assert_eq!(display_width(&short), 14);
    }
}
