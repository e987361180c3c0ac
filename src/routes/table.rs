use crate::views::View;

/// A named, path-keyed page and whether it needs a signed-in user.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: &'static str,
    pub path: &'static str,
    pub view: View,
    pub requires_auth: bool,
}

pub const LOGIN: &str = "login";

static ROUTES: [RouteDescriptor; 3] = [
    RouteDescriptor {
        name: LOGIN,
        path: "/login",
        view: View::Login,
        requires_auth: false,
    },
    RouteDescriptor {
        name: "home",
        path: "/home",
        view: View::Home,
        requires_auth: true,
    },
    RouteDescriptor {
        name: "sinup",
        path: "/sinup",
        view: View::Signup,
        requires_auth: false,
    },
];

/// All routes, in declaration order.
pub fn all() -> &'static [RouteDescriptor] {
    &ROUTES
}

/// Where signed-out users are sent.
pub fn login() -> &'static RouteDescriptor {
    &ROUTES[0]
}
