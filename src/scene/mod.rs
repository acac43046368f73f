pub(crate) mod color;
pub(crate) mod model;
pub mod presets;
pub(crate) mod state;
