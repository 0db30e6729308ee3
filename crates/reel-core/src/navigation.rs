//! Routes and screen outcomes

use reel_store::SeriesId;
use serde::{Deserialize, Serialize};

/// Storefront screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", content = "series", rename_all = "kebab-case")]
pub enum Route {
    Login,
    Home,
    Player(SeriesId),
    MyList,
    Vip,
    Profile,
    AdminPanel,
}

impl Route {
    /// URL path of the screen
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Home => "/home".to_string(),
            Self::Player(id) => format!("/player/{id}"),
            Self::MyList => "/my-list".to_string(),
            Self::Vip => "/vip".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::AdminPanel => "/admin-panel".to_string(),
        }
    }

    /// Parse a URL path
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(Self::Login),
            "/home" => Some(Self::Home),
            "/my-list" => Some(Self::MyList),
            "/vip" => Some(Self::Vip),
            "/profile" => Some(Self::Profile),
            "/admin-panel" => Some(Self::AdminPanel),
            _ => path
                .strip_prefix("/player/")
                .and_then(|id| id.parse().ok())
                .map(Self::Player),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Result of opening a screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "kebab-case")]
pub enum Outcome<T> {
    /// Screen renders with this view
    Render(T),
    /// Screen is not available; go here instead
    Redirect(Route),
}

impl<T> Outcome<T> {
    #[inline]
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    /// Redirect target, if any
    #[inline]
    #[must_use]
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::Redirect(route) => Some(*route),
            Self::Render(_) => None,
        }
    }

    /// Rendered view, if any
    #[inline]
    pub fn into_render(self) -> Option<T> {
        match self {
            Self::Render(view) => Some(view),
            Self::Redirect(_) => None,
        }
    }

    /// Map the rendered view
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Render(view) => Outcome::Render(f(view)),
            Self::Redirect(route) => Outcome::Redirect(route),
        }
    }
}
