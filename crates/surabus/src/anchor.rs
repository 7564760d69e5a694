//! In-page link handling.
//!
//! Links whose href starts with `#` are intercepted and resolved to a bound
//! page section instead of being followed.

use tracing::{debug, warn};

use crate::view::{Section, ViewBindings};

/// What to do with a clicked link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Not an in-page link; leave it alone.
    Follow,
    /// Smoothly scroll to the section.
    ScrollTo(Section),
    /// In-page link to an element that is not bound. Ignored.
    MissingTarget(String),
}

/// Resolve `href` against the bound sections.
#[must_use]
pub fn intercept(href: &str, bindings: &ViewBindings) -> Navigation {
    let Some(fragment) = href.strip_prefix('#') else {
        return Navigation::Follow;
    };

    match bindings.section(fragment) {
        Some(section) => {
            debug!("Scrolling to #{}", section.id());
            Navigation::ScrollTo(section)
        }
        None => {
            warn!("No element matches anchor '{}', ignoring", href);
            Navigation::MissingTarget(fragment.to_string())
        }
    }
}
