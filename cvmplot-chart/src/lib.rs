#![forbid(unsafe_code)]
#![allow(missing_docs)]

//! Chart rendering for cvmplot: a [`ChartSpec`] model built from parsed
//! series, drawn to SVG with plotters.

pub mod model;
pub mod render;

pub use model::{Axis, ChartSpec, LineSpec, Scale, THRESHOLD_CANVAS};
pub use render::{render_svg, render_svg_string};

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("draw: {0}")]
	Draw(String),
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	#[error(transparent)]
	Core(#[from] cvmplot_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
