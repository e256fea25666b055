//! Named SVG icon registry.
//!
//! Icons are registered by name once at bootstrap and looked up from context
//! by the `Icon` component, so views refer to icons by string name only.

#[cfg(test)]
#[path = "icons_test.rs"]
mod icons_test;

use std::collections::BTreeMap;

use leptos::prelude::*;

/// Single-path SVG glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconDef {
    pub view_box: &'static str,
    pub path: &'static str,
}

const fn glyph(path: &'static str) -> IconDef {
    IconDef { view_box: "0 0 24 24", path }
}

/// Every icon the portal chrome uses.
pub const STANDARD_ICONS: &[(&str, IconDef)] = &[
    ("House", glyph("M12 3 2 12h3v9h6v-6h2v6h6v-9h3z")),
    ("Folder", glyph("M3 5h7l2 2h9v12H3z")),
    ("Connection", glyph("M7 7h4v2H7a3 3 0 0 0 0 6h4v2H7A5 5 0 0 1 7 7zm6 0h4a5 5 0 0 1 0 10h-4v-2h4a3 3 0 0 0 0-6h-4z")),
    ("User", glyph("M12 12a4 4 0 1 0 0-8 4 4 0 0 0 0 8zm-8 8a8 8 0 0 1 16 0z")),
    ("Reading", glyph("M2 5c4-1 7 0 10 2 3-2 6-3 10-2v14c-4-1-7 0-10 2-3-2-6-3-10-2z")),
    ("ChatDotRound", glyph("M12 3a9 8 0 0 0-6 14l-1 4 4-2a9 8 0 1 0 3-16z")),
    ("Avatar", glyph("M9 11a3 3 0 1 0 0-6 3 3 0 0 0 0 6zm8 0a3 3 0 1 0 0-6 3 3 0 0 0 0 6zM2 19a7 7 0 0 1 14 0zm14 0a7 7 0 0 0-2-5 6 6 0 0 1 8 5z")),
    ("Message", glyph("M3 5h18v14H3zm2 2v1l7 5 7-5V7l-7 5z")),
    ("Document", glyph("M6 2h8l5 5v15H6zm7 1v5h5")),
    ("School", glyph("M12 3 1 9l11 6 9-5v7h2V9z")),
    ("DataAnalysis", glyph("M4 20V10h3v10zm6 0V4h3v16zm6 0v-7h3v7z")),
    ("Management", glyph("M4 4h7v7H4zm9 0h7v7h-7zM4 13h7v7H4zm9 0h7v7h-7z")),
    ("Bell", glyph("M12 22a2 2 0 0 0 2-2h-4a2 2 0 0 0 2 2zm7-6V11a7 7 0 0 0-5-7V3h-4v1a7 7 0 0 0-5 7v5l-2 2v1h18v-1z")),
    ("SwitchButton", glyph("M11 2h2v10h-2zm-4 3 1 2a7 7 0 1 0 8 0l1-2a9 9 0 1 1-10 0z")),
    ("Warning", glyph("M12 2 1 21h22zm-1 7h2v6h-2zm0 8h2v2h-2z")),
];

/// Icon name for a portal route segment.
pub fn icon_for_segment(segment: &str) -> &'static str {
    match segment {
        "dashboard" => "House",
        "projects" => "Folder",
        "cooperation" => "Connection",
        "profile" => "User",
        "resources" => "Reading",
        "forum" => "ChatDotRound",
        "teamup" => "Avatar",
        "messages" => "Message",
        "posts" => "Document",
        "students" => "School",
        "analytics" => "DataAnalysis",
        "users" => "Management",
        _ => "Document",
    }
}

/// Icons available to views, keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IconRegistry {
    icons: BTreeMap<&'static str, IconDef>,
}

impl IconRegistry {
    /// Registry holding [`STANDARD_ICONS`].
    pub fn standard() -> Self {
        let mut registry = Self::default();
        for &(name, icon) in STANDARD_ICONS {
            registry.register(name, icon);
        }
        registry
    }

    /// Register `icon` under `name`, returning any icon it replaces.
    pub fn register(&mut self, name: &'static str, icon: IconDef) -> Option<IconDef> {
        self.icons.insert(name, icon)
    }

    pub fn get(&self, name: &str) -> Option<IconDef> {
        self.icons.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.icons.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Inline SVG for a registered icon. Unknown names render nothing.
#[component]
pub fn Icon(#[prop(into)] name: String) -> impl IntoView {
    let icon = use_context::<IconRegistry>().and_then(|registry| registry.get(&name));
    match icon {
        Some(icon) => view! {
            <svg class="icon" viewBox=icon.view_box width="1em" height="1em" aria-hidden="true">
                <path fill="currentColor" d=icon.path></path>
            </svg>
        }
        .into_any(),
        None => {
            log::debug!("icon {name} is not registered");
            ().into_any()
        }
    }
}
