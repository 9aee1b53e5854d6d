//! Easing curves used by the value animator.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The closed set of easing curves understood by [`crate::animate_value`].
///
/// Names follow the JavaScript convention (`easeOutExpo`, ...) because they are
/// also accepted from CLI flags and config files. Unknown names resolve to
/// [`Easing::EaseOutExpo`], when deserializing too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    #[default]
    EaseOutExpo,
    EaseOutQuart,
    EaseOutCubic,
    EaseInOutQuad,
}

impl Easing {
    /// Every curve, in declaration order.
    pub const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseOutExpo,
        Easing::EaseOutQuart,
        Easing::EaseOutCubic,
        Easing::EaseInOutQuad,
    ];

    /// Resolve a curve by name, falling back to `easeOutExpo`.
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_default()
    }

    /// Strict lookup, `None` for unknown names.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|easing| easing.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOutExpo => "easeOutExpo",
            Easing::EaseOutQuart => "easeOutQuart",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutQuad => "easeInOutQuad",
        }
    }

    /// Apply the curve to a normalized progress value.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseOutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }

    /// The curve as a plain function pointer.
    pub fn as_fn(&self) -> fn(f64) -> f64 {
        match self {
            Easing::Linear => linear,
            Easing::EaseOutExpo => ease_out_expo,
            Easing::EaseOutQuart => ease_out_quart,
            Easing::EaseOutCubic => ease_out_cubic,
            Easing::EaseInOutQuad => ease_in_out_quad,
        }
    }
}

fn linear(t: f64) -> f64 {
    Easing::Linear.apply(t)
}

fn ease_out_expo(t: f64) -> f64 {
    Easing::EaseOutExpo.apply(t)
}

fn ease_out_quart(t: f64) -> f64 {
    Easing::EaseOutQuart.apply(t)
}

fn ease_out_cubic(t: f64) -> f64 {
    Easing::EaseOutCubic.apply(t)
}

fn ease_in_out_quad(t: f64) -> f64 {
    Easing::EaseInOutQuad.apply(t)
}

/// Resolve an easing by name. Never fails: unknown names give `easeOutExpo`.
pub fn get_easing(name: &str) -> Easing {
    Easing::from_name(name)
}

impl FromStr for Easing {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Easing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}
