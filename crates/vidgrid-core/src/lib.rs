//! Core model for vidgrid.
//!
//! This crate holds everything about the sketch that does not touch the GPU:
//! - [`Options`] and the [`VidgridError`] type
//! - the [`Lattice`] shared by the square grid and the point cloud
//! - the layout/resize policy ([`Layout`], [`Viewport`])
//! - pointer tracking, ray picking and the fixed-step [`FrameClock`]
//! - per-material uniform state ([`Materials`]) and the [`SceneGraph`]
//! - the [`CancellationToken`] that stops the frame loop

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Lattice indices and pixel sizes are converted to f32 on purpose
#![allow(clippy::cast_precision_loss)]

pub mod clock;
pub mod error;
pub mod layout;
pub mod lattice;
pub mod material;
pub mod options;
pub mod pick;
pub mod pointer;
pub mod scene;
pub mod schedule;

pub use clock::FrameClock;
pub use error::{Result, VidgridError};
pub use lattice::{Lattice, MAX_GRID_COUNT};
pub use layout::{Layout, Viewport};
pub use material::{Materials, PlaneMaterial, PointsMaterial, SquareMaterial};
pub use options::{AnimationOptions, GridOptions, LayoutOptions, Options, VideoOptions, WindowOptions};
pub use pick::{intersect_unit_quad, PickResult, Ray};
pub use pointer::PointerState;
pub use scene::{ElementKind, SceneGraph};
pub use schedule::CancellationToken;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
