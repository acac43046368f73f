//! Software compositing: blend kernels, the layer surface and the frame compositor.

pub(crate) mod backend;
pub(crate) mod blend;
pub(crate) mod compositor;
pub(crate) mod surface;
