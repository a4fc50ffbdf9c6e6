//! Font descriptor for the text tool.

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, and style.
/// The text tool builds one from its resolved settings when committing.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Serif", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Creates a regular-weight descriptor for the given family.
    pub fn with_family(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Self::default()
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Sans Bold 32" or "Monospace Italic 24"
    ///
    /// Sizes are pixel sizes, so the string carries a `px` suffix.
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}px", size.round().max(1.0) as i32));

        parts.join(" ")
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pango_string_default() {
        assert_eq!(FontDescriptor::default().to_pango_string(24.0), "Sans 24px");
    }

    #[test]
    fn pango_string_with_style_and_weight() {
        let font = FontDescriptor {
            family: "JetBrains Mono".to_string(),
            weight: "bold".to_string(),
            style: "italic".to_string(),
        };
        assert_eq!(font.to_pango_string(15.6), "JetBrains Mono Italic Bold 16px");
    }
}
