//! Account page sections, selected through the `section` query parameter.

use url::form_urlencoded;

const SECTION: &str = "section";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountSection {
    #[default]
    Profile,
    Orders,
    Favorites,
    Security,
}

impl AccountSection {
    pub const ALL: [AccountSection; 4] = [Self::Profile, Self::Orders, Self::Favorites, Self::Security];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "profile" => Some(Self::Profile),
            "orders" => Some(Self::Orders),
            "favorites" => Some(Self::Favorites),
            "security" => Some(Self::Security),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Orders => "orders",
            Self::Favorites => "favorites",
            Self::Security => "security",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Profile => "Профиль",
            Self::Orders => "Мои заказы",
            Self::Favorites => "Избранное",
            Self::Security => "Безопасность",
        }
    }

    /// Section requested by the page URL, defaulting to the profile.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == SECTION)
            .and_then(|(_, value)| Self::parse(&value))
            .unwrap_or_default()
    }

    /// `current` with its `section` parameter replaced by this one.
    pub fn merge_into_query(self, current: &str) -> String {
        let current = current.strip_prefix('?').unwrap_or(current);
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in form_urlencoded::parse(current.as_bytes()) {
            if key != SECTION {
                serializer.append_pair(&key, &value);
            }
        }
        serializer.append_pair(SECTION, self.as_str());
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_query() {
        assert_eq!(AccountSection::from_query("?section=orders"), AccountSection::Orders);
        assert_eq!(AccountSection::from_query("section=bogus"), AccountSection::Profile);
        assert_eq!(AccountSection::from_query(""), AccountSection::Profile);
    }

    #[test]
    fn test_merge_replaces_section() {
        assert_eq!(
            AccountSection::Security.merge_into_query("?section=orders&x=1"),
            "x=1&section=security"
        );
    }
}
