//! The shipped animations, by category.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Loop,
    Backgrounds,
    Attention,
    Entrance,
    Professional,
    Celebrate,
    Transform,
    Interactive,
    Container,
    Text,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Loop,
        Category::Backgrounds,
        Category::Attention,
        Category::Entrance,
        Category::Professional,
        Category::Celebrate,
        Category::Transform,
        Category::Interactive,
        Category::Container,
        Category::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Loop => "loop",
            Category::Backgrounds => "backgrounds",
            Category::Attention => "attention",
            Category::Entrance => "entrance",
            Category::Professional => "professional",
            Category::Celebrate => "celebrate",
            Category::Transform => "transform",
            Category::Interactive => "interactive",
            Category::Container => "container",
            Category::Text => "text",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// How an animation is triggered, when it is not plain CSS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Hover,
    Hold,
    /// Needs a specific markup structure
    Html,
    /// Needs the JS/Rust helpers
    Js,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Badge::Hover => "hover",
            Badge::Hold => "hold",
            Badge::Html => "html",
            Badge::Js => "js",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Animation {
    pub name: &'static str,
    pub category: Category,
    /// Approximate size of the animation's CSS, in KB
    pub size_kb: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl Animation {
    /// The base class, e.g. `tm-bounce`.
    pub fn class_name(&self) -> String {
        format!("{}{}", crate::classes::CLASS_PREFIX, self.name)
    }
}

const fn plain(name: &'static str, category: Category, size_kb: f32) -> Animation {
    Animation { name, category, size_kb, badge: None }
}

const fn badged(name: &'static str, category: Category, size_kb: f32, badge: Badge) -> Animation {
    Animation { name, category, size_kb, badge: Some(badge) }
}

use Category::*;

pub static ANIMATIONS: &[Animation] = &[
    plain("bounce", Loop, 0.3),
    plain("pulse", Loop, 0.2),
    plain("spin", Loop, 0.2),
    plain("float", Loop, 0.3),
    plain("drift", Loop, 0.3),
    plain("glow", Loop, 0.4),
    plain("morph", Loop, 0.4),
    plain("sway", Loop, 0.3),
    plain("dark-veil", Backgrounds, 0.8),
    plain("wavy-bg", Backgrounds, 0.4),
    plain("wavy-bg-subtle", Backgrounds, 0.4),
    plain("shake", Attention, 0.3),
    plain("wiggle", Attention, 0.3),
    plain("elastic", Attention, 0.4),
    plain("ripple", Attention, 0.4),
    plain("fade-in", Entrance, 0.2),
    plain("slide-up", Entrance, 0.2),
    plain("slide-down", Entrance, 0.2),
    plain("slide-left", Entrance, 0.2),
    plain("slide-right", Entrance, 0.2),
    plain("pop", Entrance, 0.3),
    plain("drop", Entrance, 0.3),
    plain("drop-in", Entrance, 0.3),
    plain("blur-in", Entrance, 0.4),
    plain("zoom-in", Entrance, 0.2),
    plain("zoom-out", Entrance, 0.2),
    plain("swing-in", Entrance, 0.3),
    plain("swing-out", Entrance, 0.3),
    plain("swing-in-left", Entrance, 0.3),
    plain("swing-out-left", Entrance, 0.3),
    plain("swing-in-right", Entrance, 0.3),
    plain("swing-out-right", Entrance, 0.3),
    plain("reveal", Professional, 0.4),
    plain("unfold", Professional, 0.3),
    plain("glide", Professional, 0.3),
    plain("glide-right", Professional, 0.3),
    plain("scale-fade", Professional, 0.3),
    plain("rise", Professional, 0.3),
    plain("sparkle", Celebrate, 0.3),
    plain("fill-up", Celebrate, 0.3),
    plain("burst", Celebrate, 0.3),
    plain("confetti", Celebrate, 0.3),
    plain("flip-x", Transform, 0.3),
    plain("flip-y", Transform, 0.3),
    badged("liquid-btn", Interactive, 0.5, Badge::Hover),
    badged("liquid-wave", Interactive, 0.3, Badge::Hover),
    badged("liquid-underline", Interactive, 0.3, Badge::Hover),
    badged("shimmer-hover", Interactive, 0.3, Badge::Hover),
    badged("lift-hover", Interactive, 0.3, Badge::Hover),
    badged("rotate-hover", Interactive, 0.2, Badge::Hover),
    badged("flip-hover", Interactive, 0.3, Badge::Hover),
    badged("hold-delete", Interactive, 0.4, Badge::Hold),
    badged("stagger", Container, 0.3, Badge::Html),
    badged("count-reveal", Container, 0.4, Badge::Html),
    badged("avatar-group", Container, 0.5, Badge::Html),
    badged("text-flip", Text, 0.4, Badge::Js),
    badged("text-morph", Text, 0.3, Badge::Js),
    plain("slide-digit", Text, 0.2),
];

pub fn find(name: &str) -> Option<&'static Animation> {
    let name = name.strip_prefix(crate::classes::CLASS_PREFIX).unwrap_or(name);
    ANIMATIONS.iter().find(|animation| animation.name == name)
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static Animation> {
    ANIMATIONS.iter().filter(move |animation| animation.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_are_unique() {
        let mut names: Vec<_> = ANIMATIONS.iter().map(|a| a.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ANIMATIONS.len());
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Category::ALL {
            assert!(by_category(category).next().is_some(), "{} is empty", category);
        }
        assert_eq!(by_category(Category::Backgrounds).count(), 3);
    }

    #[test]
    fn test_find() {
        let flip = find("text-flip").unwrap();
        assert_eq!(flip.badge, Some(Badge::Js));
        assert_eq!(flip.class_name(), "tm-text-flip");
        assert_eq!(find("tm-bounce").map(|a| a.category), Some(Category::Loop));
        assert!(find("teleport").is_none());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("celebrate".parse::<Category>(), Ok(Category::Celebrate));
        assert!("Loop".parse::<Category>().is_err());
    }
}
