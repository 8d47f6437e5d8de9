//! pointspin - rotating point-cloud animations of parametric solids
//!
//! A solid (prism, sphere or tetrahedron) is sampled once into a lattice of
//! points. The lattice is rotated through a ramp of orientations, each
//! orientation is rendered to a still, and the stills become a looping GIF.
//!
//! ## Pipeline
//! - `shapes`: point sampling and the viewport half-width `lim`
//! - `effects`: the combined yaw/pitch/roll rotation
//! - `schedule`: frame count and per-frame angles
//! - `render`: the `Renderer` contract and a built-in scatter renderer
//! - `animation`: frame sinks, scratch staging and GIF encoding
//! - `pipeline`: runs the stages in order

pub mod animation;
pub mod effects;
pub mod pipeline;
pub mod render;
pub mod schedule;
pub mod settings;
pub mod shapes;
