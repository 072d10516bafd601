/// The categories offered when entering an expense.
///
/// Stored expenses keep their category as free text, so a record may carry a
/// label outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    FoodAndDining,
    Transport,
    Shopping,
    Health,
    Entertainment,
    Utilities,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Others => "Others",
        }
    }

    /// Case-insensitive lookup of a known category. Also accepts "food" and
    /// "other" as shorthands.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food & dining" | "food and dining" | "food" => Some(Self::FoodAndDining),
            "transport" => Some(Self::Transport),
            "shopping" => Some(Self::Shopping),
            "health" => Some(Self::Health),
            "entertainment" => Some(Self::Entertainment),
            "utilities" => Some(Self::Utilities),
            "others" | "other" => Some(Self::Others),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::FoodAndDining,
            Self::Transport,
            Self::Shopping,
            Self::Health,
            Self::Entertainment,
            Self::Utilities,
            Self::Others,
        ]
    }

    /// Canonical spelling for a known category, the trimmed input otherwise.
    pub fn normalize(s: &str) -> String {
        match Self::parse(s) {
            Some(cat) => cat.as_str().to_string(),
            None => s.trim().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
