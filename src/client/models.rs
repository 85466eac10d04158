use serde::{Deserialize, Serialize};

/// One entry of the site's search listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display title, trimmed
    pub name: String,
    /// Slug after `/category/`, usable as input to the detail lookups
    pub url: String,
    pub full_url: String,
    /// Site-relative link exactly as it appears in the markup
    pub href: String,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Ongoing,
    Upcoming,
    Completed,
}

pub const DEFAULT_FILTERS: [Filter; 2] = [Filter::Ongoing, Filter::Upcoming];

impl Filter {
    pub fn as_query_fragment(&self) -> &'static str {
        match self {
            Filter::Ongoing => "&status[]=Ongoing",
            Filter::Upcoming => "&status[]=Upcoming",
            Filter::Completed => "&status[]=Completed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "ONGOING" => Some(Filter::Ongoing),
            "UPCOMING" => Some(Filter::Upcoming),
            "COMPLETED" => Some(Filter::Completed),
            _ => None,
        }
    }

    /// Resolve filter names in order, silently dropping names the site doesn't know.
    pub fn parse_names<I, S>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| Filter::from_name(name.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Filter::from_name("ONGOING"), Some(Filter::Ongoing));
        assert_eq!(Filter::from_name("upcoming"), Some(Filter::Upcoming));
        assert_eq!(Filter::from_name(" Completed "), Some(Filter::Completed));
        assert_eq!(Filter::from_name("AIRING"), None);
    }

    #[test]
    fn test_parse_names_keeps_order_and_drops_unknown() {
        let filters = Filter::parse_names(["COMPLETED", "bogus", "ONGOING", ""]);
        assert_eq!(filters, vec![Filter::Completed, Filter::Ongoing]);
    }

    #[test]
    fn test_parse_names_all_unknown() {
        assert!(Filter::parse_names(["dubbed", "movie"]).is_empty());
    }
}
