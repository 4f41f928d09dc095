//! Static page routing for the four bookmark views.
//!
//! # Responsibility
//! - Declare the route table (`/`, `/add`, `/edit/:id`, `/config`).
//! - Resolve a location string into a typed `Route`.
//! - Render a `Route` back to its canonical path.
//!
//! # Invariants
//! - The table is fixed at compile time: no guards, no nesting, no lazy views.
//! - Static segments match case-insensitively and a trailing slash is allowed.
//! - Query string and fragment never take part in matching.

use crate::model::bookmark::BookmarkId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub name: &'static str,
    pub path: &'static str,
}

pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        name: "home",
        path: "/",
    },
    RouteRecord {
        name: "add",
        path: "/add",
    },
    RouteRecord {
        name: "edit",
        path: "/edit/:id",
    },
    RouteRecord {
        name: "config",
        path: "/config",
    },
];

static ROUTE_PATTERNS: Lazy<Vec<(RouteRecord, Regex)>> = Lazy::new(|| {
    ROUTES
        .iter()
        .map(|record| (*record, compile_path(record.path)))
        .collect()
});

/// Resolved page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Bookmark list.
    Home,
    /// New bookmark form.
    Add,
    /// Edit form for one bookmark.
    Edit { id: BookmarkId },
    /// Import/export/delete-all screen.
    Config,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Add => "add",
            Self::Edit { .. } => "edit",
            Self::Config => "config",
        }
    }

    /// Canonical path without any base prefix.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Add => "/add".to_string(),
            Self::Edit { id } => format!("/edit/{id}"),
            Self::Config => "/config".to_string(),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No route pattern matches the location.
    NoMatch(String),
    /// A pattern matched but a parameter could not be parsed.
    InvalidParam { name: &'static str, value: String },
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch(location) => write!(f, "no route matches `{location}`"),
            Self::InvalidParam { name, value } => {
                write!(f, "route parameter `{name}` has invalid value `{value}`")
            }
        }
    }
}

impl Error for RouteError {}

/// Route resolver with an optional base path (e.g. `/bookmarks/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    base: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::with_base("/")
    }

    /// Mounts every route under `base`. Leading/trailing slashes are optional.
    pub fn with_base(base: &str) -> Self {
        let trimmed = base.trim().trim_matches('/');
        let base = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { base }
    }

    pub fn routes(&self) -> &'static [RouteRecord] {
        ROUTES
    }

    /// Full location for `route`, including the base path.
    pub fn href(&self, route: &Route) -> String {
        format!("{}{}", self.base, route.path())
    }

    /// Resolves a location such as `/edit/1700000000000?from=list`.
    pub fn resolve(&self, location: &str) -> Result<Route, RouteError> {
        let path = strip_query_and_fragment(location.trim());
        let path = self.strip_base(path);
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        for (record, pattern) in ROUTE_PATTERNS.iter() {
            let Some(captures) = pattern.captures(&path) else {
                continue;
            };
            return match record.name {
                "home" => Ok(Route::Home),
                "add" => Ok(Route::Add),
                "config" => Ok(Route::Config),
                _ => {
                    let raw = captures.name("id").map_or("", |m| m.as_str());
                    raw.parse::<BookmarkId>()
                        .map(|id| Route::Edit { id })
                        .map_err(|_| RouteError::InvalidParam {
                            name: "id",
                            value: raw.to_string(),
                        })
                }
            };
        }

        Err(RouteError::NoMatch(location.to_string()))
    }

    fn strip_base<'a>(&self, path: &'a str) -> &'a str {
        if self.base.is_empty() {
            return path;
        }
        match path.strip_prefix(self.base.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

fn strip_query_and_fragment(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}

/// Compiles `/edit/:id` style templates into anchored, case-insensitive regexes.
fn compile_path(template: &str) -> Regex {
    let body = template
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => format!("/(?P<{param}>[^/]+)"),
            None => format!("/{}", regex::escape(segment)),
        })
        .collect::<String>();
    Regex::new(&format!("(?i)^{body}/?$")).expect("valid route pattern")
}
