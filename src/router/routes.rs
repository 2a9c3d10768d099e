//! Static route table and path matching.
//!
//! Route metadata is fixed when the table is built and only read during
//! navigation.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::collections::BTreeMap;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Per-route guard flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Anonymous visitors are sent to the login page.
    pub requires_login: bool,
    /// Logged-in visitors are sent home (login/signup pages).
    pub redirect_if_logged_in: bool,
}

impl RouteMeta {
    pub const NONE: Self = Self { requires_login: false, redirect_if_logged_in: false };
    pub const REQUIRES_LOGIN: Self = Self { requires_login: true, redirect_if_logged_in: false };
    pub const REDIRECT_IF_LOGGED_IN: Self = Self { requires_login: false, redirect_if_logged_in: true };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    /// Pattern such as `/column/:id`; `:name` segments capture one segment.
    pub pattern: &'static str,
    pub meta: RouteMeta,
}

/// A path resolved against the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: &'static str,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub meta: RouteMeta,
}

impl RouteMatch {
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    base: String,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes, base: String::new() }
    }

    /// The application's routes.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Route { name: "home", pattern: HOME_PATH, meta: RouteMeta::NONE },
            Route { name: "login", pattern: LOGIN_PATH, meta: RouteMeta::REDIRECT_IF_LOGGED_IN },
            Route { name: "signup", pattern: "/signup", meta: RouteMeta::REDIRECT_IF_LOGGED_IN },
            Route { name: "create", pattern: "/create", meta: RouteMeta::REQUIRES_LOGIN },
            Route { name: "column", pattern: "/column/:id", meta: RouteMeta::NONE },
            Route { name: "post", pattern: "/posts/:id", meta: RouteMeta::NONE },
            Route { name: "edit", pattern: "/edit", meta: RouteMeta::REQUIRES_LOGIN },
        ])
    }

    /// Serve the table under a base path such as `/vue-zheye`.
    #[must_use]
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = crate::config::normalize_router_base(base);
        self
    }

    /// Normalize `raw` to a table-relative path: base stripped, query and
    /// fragment dropped, leading `/` ensured, trailing `/` removed.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let path = raw.split(['?', '#']).next().unwrap_or_default().trim();
        let path = if self.base.is_empty() {
            path
        } else {
            match path.strip_prefix(self.base.as_str()) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                _ => path,
            }
        };
        let trimmed = path.trim_matches('/');
        format!("/{trimmed}")
    }

    /// Match `raw` against the table; the first matching route wins.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<RouteMatch> {
        let path = self.normalize(raw);
        self.routes.iter().find_map(|route| {
            match_pattern(route.pattern, &path).map(|params| RouteMatch {
                name: route.name,
                path: path.clone(),
                params,
                meta: route.meta,
            })
        })
    }

    /// Guard metadata for `raw`; unknown paths carry no flags.
    #[must_use]
    pub fn meta_for(&self, raw: &str) -> RouteMeta {
        self.resolve(raw).map_or(RouteMeta::NONE, |m| m.meta)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();
    let mut want = segments(pattern);
    let mut have = segments(path);
    loop {
        match (want.next(), have.next()) {
            (None, None) => return Some(params),
            (Some(w), Some(h)) => {
                if let Some(name) = w.strip_prefix(':') {
                    params.insert(name.to_owned(), h.to_owned());
                } else if w != h {
                    return None;
                }
            }
            _ => return None,
        }
    }
}
