// src/lib.rs
//! Decorative wireframe-and-starfield scene viewer.
//!
//! Renders a subdivided wireframe octahedron inside a 7000-point starfield,
//! lit by three colored point lights, with an auto-rotating orbital camera,
//! a one-shot entrance timeline, and pointer/touch-reactive wireframe color.

pub mod anim;
pub mod app;
pub mod camera;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod timeline;
pub mod ui;
pub mod viewport;
