//! Public landing page.

use qwenht_auth::LOGIN_ROUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub text: &'static str,
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Secure Authentication",
        text: "Enterprise-grade security with JWT-based authentication and authorization.",
    },
    Feature {
        title: "User Management",
        text: "Comprehensive user and role management system with granular permissions.",
    },
    Feature {
        title: "Easy Integration",
        text: "Simple APIs and components to integrate with your existing applications.",
    },
];

/// Static content; no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeView;

impl HomeView {
    pub fn title(&self) -> &'static str {
        "Welcome to QwenHT Identity Management"
    }

    pub fn lead(&self) -> &'static str {
        "Secure and scalable identity management for your applications"
    }

    /// Call-to-action links: (label, target).
    pub fn actions(&self) -> [(&'static str, &'static str); 2] {
        [("Get Started", "/auth"), ("Login", LOGIN_ROUTE)]
    }

    pub fn features(&self) -> &'static [Feature] {
        &FEATURES
    }
}
