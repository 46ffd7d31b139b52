use std::collections::BTreeSet;
use std::fmt;

/// Allow-list entry that matches every origin.
pub const WILDCARD: &str = "*";

/// Origins permitted to call the relay from a browser.
///
/// A configured wildcard overrides any explicit entries listed next to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedOrigins {
    exact: BTreeSet<String>,
    any: bool,
}

impl AllowedOrigins {
    /// Parses a comma-separated list, ignoring blank entries.
    pub fn parse(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && !self.any
    }

    /// Requests without an `Origin` header come from non-browser callers and
    /// are always permitted.
    pub fn permits(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(_) if self.any => true,
            Some(origin) => self.exact.contains(origin),
        }
    }
}

impl<'a> FromIterator<&'a str> for AllowedOrigins {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut origins = Self::default();
        for entry in iter {
            if entry == WILDCARD {
                origins.any = true;
            } else {
                origins.exact.insert(entry.to_string());
            }
        }
        origins
    }
}

impl fmt::Display for AllowedOrigins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<&str> = self.exact.iter().map(String::as_str).collect();
        if self.any {
            entries.insert(0, WILDCARD);
        }
        write!(f, "{}", entries.join(", "))
    }
}
