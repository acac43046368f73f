/// Easing functions used to map normalized animation progress.
///
/// Identifiers follow the common `family.direction` naming (`power2.out`, `sine.inOut`). The
/// `powerN` families map to polynomial degree `N + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// No explicit curve: callers substitute their own default via [`Ease::or`].
    #[default]
    None,
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-in.
    InQuint,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in/out.
    InOutQuint,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
}

impl Ease {
    /// Parse an ease identifier. Unknown identifiers yield `None`.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        let (family, dir) = match id.split_once('.') {
            Some((f, d)) => (f.to_owned(), d.to_owned()),
            None => (id.clone(), "out".to_owned()),
        };
        let degree = match family.as_str() {
            "none" => return Some(Self::None),
            "linear" | "power0" => return Some(Self::Linear),
            "quad" | "power1" => 2,
            "cubic" | "power2" => 3,
            "quart" | "power3" => 4,
            "quint" | "power4" | "strong" => 5,
            "sine" => 0,
            _ => return None,
        };
        let ease = match (degree, dir.as_str()) {
            (2, "in") => Self::InQuad,
            (2, "out") => Self::OutQuad,
            (2, "inout") => Self::InOutQuad,
            (3, "in") => Self::InCubic,
            (3, "out") => Self::OutCubic,
            (3, "inout") => Self::InOutCubic,
            (4, "in") => Self::InQuart,
            (4, "out") => Self::OutQuart,
            (4, "inout") => Self::InOutQuart,
            (5, "in") => Self::InQuint,
            (5, "out") => Self::OutQuint,
            (5, "inout") => Self::InOutQuint,
            (0, "in") => Self::InSine,
            (0, "out") => Self::OutSine,
            (0, "inout") => Self::InOutSine,
            _ => return None,
        };
        Some(ease)
    }

    /// Return `fallback` when this ease is [`Ease::None`].
    pub fn or(self, fallback: Ease) -> Ease {
        match self {
            Self::None => fallback,
            other => other,
        }
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// [`Ease::None`] behaves as linear.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::None | Self::Linear => t,
            Self::InQuad => ease_in(t, 2),
            Self::OutQuad => ease_out(t, 2),
            Self::InOutQuad => ease_in_out(t, 2),
            Self::InCubic => ease_in(t, 3),
            Self::OutCubic => ease_out(t, 3),
            Self::InOutCubic => ease_in_out(t, 3),
            Self::InQuart => ease_in(t, 4),
            Self::OutQuart => ease_out(t, 4),
            Self::InOutQuart => ease_in_out(t, 4),
            Self::InQuint => ease_in(t, 5),
            Self::OutQuint => ease_out(t, 5),
            Self::InOutQuint => ease_in_out(t, 5),
            Self::InSine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::OutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

fn ease_in(t: f64, n: i32) -> f64 {
    t.powi(n)
}

fn ease_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

fn ease_in_out(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(n) / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
