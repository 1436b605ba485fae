//! File format adapters for the reconstruction CLI.
//!
//! The core library works entirely in memory over [`hoppe_recon_core::PointCloud`]
//! and [`hoppe_recon_core::Triangle`] values; this module owns every on-disk
//! representation so the core stays free of I/O concerns.

mod obj;
mod ply;
mod xyz;

pub use obj::{ObjWriteError, write_obj};
pub use ply::{PlyWriteError, write_plane_cloud_ply};
pub use xyz::{XyzReadError, read_point_cloud};
