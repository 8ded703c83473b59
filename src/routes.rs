use std::fmt;

/// Navigation targets of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    AddPost,
    EditPost(String),
    PostDetails(String),
    Profile,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::AddPost => "/blog/add".to_string(),
            Route::EditPost(id) => format!("/blog/edit/{}", id),
            Route::PostDetails(id) => format!("/blog/details/{}", id),
            Route::Profile => "/blog/profile".to_string(),
        }
    }

    /// Routes that require a stored session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::AddPost | Route::EditPost(_) | Route::PostDetails(_) | Route::Profile
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Entry of the header menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    Link { label: &'static str, route: Route },
    Logout,
}

/// Header menu: authoring links when logged in, auth links otherwise.
pub fn menu(logged_in: bool) -> Vec<NavItem> {
    if logged_in {
        vec![
            NavItem::Link {
                label: "Add Blog",
                route: Route::AddPost,
            },
            NavItem::Link {
                label: "Profile",
                route: Route::Profile,
            },
            NavItem::Logout,
        ]
    } else {
        vec![
            NavItem::Link {
                label: "Login",
                route: Route::Login,
            },
            NavItem::Link {
                label: "Sign up",
                route: Route::Register,
            },
        ]
    }
}
