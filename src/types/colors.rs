use super::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Type-safe color enum instead of strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    GrayBackground,
    BrownBackground,
    RedBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
}

impl std::str::FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Color::Default),
            "gray" => Ok(Color::Gray),
            "brown" => Ok(Color::Brown),
            "red" => Ok(Color::Red),
            "orange" => Ok(Color::Orange),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "purple" => Ok(Color::Purple),
            "pink" => Ok(Color::Pink),
            "gray_background" => Ok(Color::GrayBackground),
            "brown_background" => Ok(Color::BrownBackground),
            "red_background" => Ok(Color::RedBackground),
            "orange_background" => Ok(Color::OrangeBackground),
            "yellow_background" => Ok(Color::YellowBackground),
            "green_background" => Ok(Color::GreenBackground),
            "blue_background" => Ok(Color::BlueBackground),
            "purple_background" => Ok(Color::PurpleBackground),
            "pink_background" => Ok(Color::PinkBackground),
            _ => Err(ValidationError::InvalidColor(s.to_string())),
        }
    }
}

impl Color {
    /// Parses a color, mapping anything outside the palette to `Default`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::debug!("Unknown color '{}', rendering without style", s);
            Color::Default
        })
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Gray => "gray",
            Color::Brown => "brown",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::GrayBackground => "gray_background",
            Color::BrownBackground => "brown_background",
            Color::RedBackground => "red_background",
            Color::OrangeBackground => "orange_background",
            Color::YellowBackground => "yellow_background",
            Color::GreenBackground => "green_background",
            Color::BlueBackground => "blue_background",
            Color::PurpleBackground => "purple_background",
            Color::PinkBackground => "pink_background",
        }
    }

    /// CSS class applied to text carrying this color; `None` for the default.
    pub fn css_class(&self) -> Option<String> {
        match self {
            Color::Default => None,
            other => Some(format!("notion-{}", other.as_str())),
        }
    }

    /// Check if this is a background color
    pub fn is_background(&self) -> bool {
        self.as_str().ends_with("_background")
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Color::parse_lenient).unwrap_or_default())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_str("red").unwrap(), Color::Red);
        assert_eq!(
            Color::from_str("gray_background").unwrap(),
            Color::GrayBackground
        );
        assert!(Color::from_str("chartreuse").is_err());
        assert_eq!(Color::parse_lenient("chartreuse"), Color::Default);
    }

    #[test]
    fn test_background_colors() {
        assert!(!Color::Red.is_background());
        assert!(Color::RedBackground.is_background());
    }

    #[test]
    fn test_css_class() {
        assert_eq!(Color::Default.css_class(), None);
        assert_eq!(Color::Blue.css_class().as_deref(), Some("notion-blue"));
        assert_eq!(
            Color::PinkBackground.css_class().as_deref(),
            Some("notion-pink_background")
        );
    }

    #[test]
    fn test_lenient_deserialization() {
        let color: Color = serde_json::from_str("\"chartreuse\"").unwrap();
        assert_eq!(color, Color::Default);
        let color: Color = serde_json::from_str("null").unwrap();
        assert_eq!(color, Color::Default);
        let color: Color = serde_json::from_str("\"green_background\"").unwrap();
        assert_eq!(color, Color::GreenBackground);
    }
}
