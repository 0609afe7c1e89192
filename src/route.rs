//! Navigation surface: `/` for the list, `/details/{id}` for a detail page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const DETAIL_PREFIX: &str = "/details/";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    #[default]
    List,
    /// Raw path segment; only parsed into an id when the detail page loads.
    Detail(String),
}

impl Route {
    pub fn detail(id: u32) -> Self {
        Route::Detail(id.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(segment) => format!("{DETAIL_PREFIX}{segment}"),
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Ok(Route::List);
        }
        match path.strip_prefix(DETAIL_PREFIX) {
            Some(segment) if !segment.is_empty() && !segment.contains('/') => {
                Ok(Route::Detail(segment.to_string()))
            }
            _ => Err(format!("unknown route: {path}")),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Detail identifiers must be positive integers; anything else is "not found".
pub fn parse_id(segment: &str) -> Option<u32> {
    segment.parse::<u32>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!("/".parse::<Route>(), Ok(Route::List));
        assert_eq!("".parse::<Route>(), Ok(Route::List));
        assert_eq!(
            "/details/25".parse::<Route>(),
            Ok(Route::Detail("25".to_string()))
        );
        assert_eq!(
            "/details/notanumber".parse::<Route>(),
            Ok(Route::Detail("notanumber".to_string()))
        );
        assert!("/details/".parse::<Route>().is_err());
        assert!("/settings".parse::<Route>().is_err());
    }

    #[test]
    fn test_path_round_trip() {
        let route = Route::detail(25);
        assert_eq!(route.path(), "/details/25");
        assert_eq!(route.path().parse::<Route>(), Ok(route));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("25"), Some(25));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("notanumber"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id(""), None);
    }
}
