pub(crate) mod ease;
pub(crate) mod smoother;
pub(crate) mod tween;
