const BASE_INSTRUCTION: &str = "Replace the clothing worn by the person in image 1 with the garment shown in image 2. \
Keep the person's identity, face, hairstyle, pose, body shape and the background unchanged, \
and make the new garment fit the body naturally with consistent lighting and shadows.";

pub const DEFAULT_SUFFIX: &str =
    "Render the result as a photorealistic, high-resolution photograph that matches the style of image 1.";

pub const SKETCH_SUFFIX: &str =
    "Render the result as a hand-drawn pencil sketch with clean line art and soft shading.";

/// Output aesthetic requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Original,
    Sketch,
}

impl Style {
    /// Total over every input; anything unknown falls back to `Original`.
    pub fn parse(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "sketch" => Style::Sketch,
            _ => Style::Original,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Style::Original => DEFAULT_SUFFIX,
            Style::Sketch => SKETCH_SUFFIX,
        }
    }
}

pub fn build_prompt(style: &str) -> String {
    format!("{} {}", BASE_INSTRUCTION, Style::parse(style).suffix())
}

/// Like [`build_prompt`], restricted to the named garment parts when any are given.
pub fn build_prompt_with_parts(style: &str, parts: &[String]) -> String {
    let prompt = build_prompt(style);
    let parts: Vec<&str> = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        return prompt;
    }

    format!(
        "{} Only replace these parts: {}; leave all other clothing as it is.",
        prompt,
        parts.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sketch_selects_sketch_suffix() {
        let prompt = build_prompt("sketch");
        assert!(prompt.contains(SKETCH_SUFFIX));
        assert!(!prompt.contains(DEFAULT_SUFFIX));
        assert!(prompt.contains("image 1"));
        assert!(prompt.contains("image 2"));
    }

    #[test]
    fn original_and_unknown_fall_back_to_default() {
        for selector in ["original", "", "chibi", "cartoon", "🙂"] {
            let prompt = build_prompt(selector);
            assert!(prompt.ends_with(DEFAULT_SUFFIX), "{selector}");
        }
    }

    #[test]
    fn selector_matching_ignores_case_and_whitespace() {
        assert_eq!(Style::parse(" Sketch "), Style::Sketch);
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(build_prompt("sketch"), build_prompt("sketch"));
        assert_eq!(build_prompt("x"), build_prompt("original"));
    }

    #[test]
    fn parts_narrow_the_edit() {
        let parts = vec!["top".to_string(), " ".to_string(), "shoes".to_string()];
        let prompt = build_prompt_with_parts("original", &parts);
        assert!(prompt.starts_with(&build_prompt("original")));
        assert!(prompt.contains("Only replace these parts: top, shoes;"));

        assert_eq!(build_prompt_with_parts("sketch", &[]), build_prompt("sketch"));
    }
}
