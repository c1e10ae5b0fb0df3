//! Presentation math for note link graphs.
//!
//! Pure data in, pure data out: [`radial_layout`] assigns plane coordinates,
//! [`Scene`] resolves visuals and caps what gets drawn, and
//! [`ViewportController`] turns pointer and wheel input into pan/zoom
//! transforms. No GUI toolkit is bound here; a host surface feeds events in
//! and draws what comes out.

mod layout;
mod scene;
mod viewport;

pub use layout::{radial_layout, Layout, Pos, BASE_RADIUS, RADIUS_STEP};
pub use scene::{
    node_color, node_radius, EdgeSegment, NodeGlyph, Scene, SceneError, MAX_RENDERED_NODES,
};
pub use viewport::{PointerButton, ScreenPos, SurfaceSize, Viewport, ViewportController};
