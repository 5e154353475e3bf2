//! Rasterizer and PNG encoder for the Stash It application icon.
//!
//! Main features:
//!  - Square RGBA pixel buffers with clipped alpha blending
//!  - Rounded rectangle, bookmark and arrow primitives
//!  - Minimal PNG encoder (zlib compressed, unfiltered scanlines)
//!
#![deny(warnings)]

mod color;
mod encode;
mod error;
mod icon;
mod image;
mod shape;

/// Floating point type used for scale factors
pub type Scalar = f64;

pub use color::{ColorError, RGBA};
pub use encode::{Chunk, PNG_SIGNATURE, compress, encode, encode_rgba, header, scanlines};
pub use error::Error;
pub use icon::{
    Generated, IconSet, IconSpec, Palette, REFERENCE_SIZE, icon_layers, render_icon,
    render_icon_with, write_icon,
};
pub use image::PixelBuffer;
pub use shape::{
    Arrow, Bookmark, BookmarkGeometry, Fill, RoundedRect, Shape, arrow_head_half_width,
    bottom_corner_center, notch_half_width, rounded_rect_contains, top_corner_center, within_arc,
};
