//! SVG rendering of a [`ChartSpec`] through plotters.
//!
//! The canvas is split in two: the chart on the left and the legend in its
//! own panel past the right edge of the plot area.

use crate::model::{ChartSpec, Scale};
use crate::{Error, Result};
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::{fs, path::Path};
use tracing::{info, warn};

const FONT: &str = "sans-serif";
const TITLE_SIZE: i32 = 24;
const LEGEND_FONT_SIZE: i32 = 15;
const LEGEND_ROW: i32 = 24;
const LEGEND_PAD: i32 = 12;
const LEGEND_SWATCH: i32 = 28;
const LEGEND_TOP: i32 = 50;

/// Renders `spec` and writes the SVG document to `path`, creating parent
/// directories as needed.
pub fn render_svg(spec: &ChartSpec, path: impl AsRef<Path>, size: (u32, u32)) -> Result<()> {
	let path = path.as_ref();
	let svg = render_svg_string(spec, size)?;
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, svg)?;
	info!(path = %path.display(), lines = spec.lines.len(), "chart written");
	Ok(())
}

pub fn render_svg_string(spec: &ChartSpec, size: (u32, u32)) -> Result<String> {
	if spec.is_empty() {
		warn!(title = %spec.title, "chart has no data points");
	}
	let mut buf = String::new();
	{
		let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
		draw(&root, spec)?;
		root.present().map_err(draw_error)?;
	}
	Ok(buf)
}

fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()> {
	root.fill(&WHITE).map_err(draw_error)?;
	let (width, _) = root.dim_in_pixel();
	let legend_width = legend_width(spec, width);
	let split = i32::try_from(width.saturating_sub(legend_width)).unwrap_or(i32::MAX);
	let (plot_area, legend_area) = root.split_horizontally(split);

	let (x0, x1) = spec.x_range();
	let (y0, y1) = spec.y_range();
	match (spec.x.scale, spec.y.scale) {
		(Scale::Log, Scale::Log) => draw_chart(&plot_area, spec, (x0..x1).log_scale(), (y0..y1).log_scale())?,
		(Scale::Log, Scale::Linear) => draw_chart(&plot_area, spec, (x0..x1).log_scale(), y0..y1)?,
		(Scale::Linear, Scale::Log) => draw_chart(&plot_area, spec, x0..x1, (y0..y1).log_scale())?,
		(Scale::Linear, Scale::Linear) => draw_chart(&plot_area, spec, x0..x1, y0..y1)?,
	}
	draw_legend(&legend_area, spec)
}

fn draw_chart<DB, X, Y>(area: &DrawingArea<DB, Shift>, spec: &ChartSpec, x_spec: X, y_spec: Y) -> Result<()>
where
	DB: DrawingBackend,
	X: AsRangedCoord<Value = f64>,
	Y: AsRangedCoord<Value = f64>,
	X::CoordDescType: ValueFormatter<f64>,
	Y::CoordDescType: ValueFormatter<f64>,
{
	let mut chart = ChartBuilder::on(area)
		.caption(&spec.title, (FONT, TITLE_SIZE).into_font())
		.margin(15)
		.x_label_area_size(50)
		.y_label_area_size(70)
		.build_cartesian_2d(x_spec, y_spec)
		.map_err(draw_error)?;

	// Major and minor grid lines both stay visible.
	chart
		.configure_mesh()
		.x_desc(spec.x.desc.as_str())
		.y_desc(spec.y.desc.as_str())
		.x_label_formatter(&|v: &f64| format_tick(*v))
		.y_label_formatter(&|v: &f64| format_tick(*v))
		.bold_line_style(BLACK.mix(0.25))
		.light_line_style(BLACK.mix(0.08))
		.draw()
		.map_err(draw_error)?;

	for (idx, line) in spec.lines.iter().enumerate() {
		let points = spec.plottable(line);
		if points.len() < line.points.len() {
			warn!(label = %line.label, skipped = line.points.len() - points.len(), "points outside the axis domain");
		}
		chart
			.draw_series(LineSeries::new(points, line_style(idx, line.stroke_width)))
			.map_err(draw_error)?;
	}
	Ok(())
}

fn draw_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()> {
	if spec.lines.is_empty() {
		return Ok(());
	}
	let (width, _) = area.dim_in_pixel();
	let bottom = LEGEND_TOP + LEGEND_ROW * spec.lines.len() as i32;
	area.draw(&Rectangle::new(
		[(LEGEND_PAD / 2, LEGEND_TOP - LEGEND_ROW / 2), (width as i32 - LEGEND_PAD / 2, bottom)],
		BLACK.mix(0.4).stroke_width(1),
	))
	.map_err(draw_error)?;

	let font = (FONT, LEGEND_FONT_SIZE).into_font();
	for (idx, line) in spec.lines.iter().enumerate() {
		let y = LEGEND_TOP + LEGEND_ROW * idx as i32;
		area.draw(&PathElement::new(
			vec![(LEGEND_PAD, y), (LEGEND_PAD + LEGEND_SWATCH, y)],
			line_style(idx, line.stroke_width),
		))
		.map_err(draw_error)?;
		area.draw(&Text::new(
			line.label.clone(),
			(LEGEND_PAD + LEGEND_SWATCH + 8, y - LEGEND_FONT_SIZE / 2),
			font.clone(),
		))
		.map_err(draw_error)?;
	}
	Ok(())
}

fn legend_width(spec: &ChartSpec, canvas_width: u32) -> u32 {
	if spec.lines.is_empty() {
		return 0;
	}
	let longest = spec.lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0) as u32;
	let text = longest * (LEGEND_FONT_SIZE as u32 * 3 / 5);
	let wanted = (2 * LEGEND_PAD + LEGEND_SWATCH + 8) as u32 + text;
	wanted.clamp(120, (canvas_width / 3).max(120))
}

fn line_style(idx: usize, stroke_width: u32) -> ShapeStyle {
	Palette99::pick(idx).stroke_width(stroke_width)
}

fn format_tick(v: f64) -> String {
	let mag = v.abs();
	if mag != 0.0 && !(1e-3..1e5).contains(&mag) {
		format!("{v:.0e}")
	} else if v.fract() == 0.0 {
		format!("{v:.0}")
	} else {
		let s = format!("{v:.3}");
		s.trim_end_matches('0').trim_end_matches('.').to_string()
	}
}

fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
	Error::Draw(e.to_string())
}
