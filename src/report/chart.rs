use std::fmt::Display;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::harness::BenchResults;

const PALETTE: [RGBColor; 4] = [
    RGBColor(0x1F, 0x77, 0xB4),
    RGBColor(0xFF, 0x7F, 0x0E),
    RGBColor(0x2C, 0xA0, 0x2C),
    RGBColor(0xD6, 0x27, 0x28),
];

const FONT: &str = "sans-serif";

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub width: u32,
    pub height: u32,
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn draw_error(err: impl Display) -> Error {
    Error::Chart(err.to_string())
}

impl LineChart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        LineChart {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            width: 1000,
            height: 600,
        }
    }

    // Size against mean time, one curve per algorithm.
    pub fn from_results(results: &BenchResults) -> Self {
        let mut chart = LineChart::new(
            format!(
                "Sorting Algorithm Performance (averaged over {} trials)",
                results.trials
            ),
            "Dataset size (n)",
            "Average execution time (seconds)",
        );
        for (algorithm, by_size) in results.iter() {
            chart.series.push(Series {
                label: algorithm.name().to_string(),
                points: by_size
                    .iter()
                    .map(|(&size, &secs)| (size as f64, secs))
                    .collect(),
            });
        }
        chart
    }

    // x padded by 5% on both sides, y from zero to 5% above the slowest mean.
    fn ranges(&self) -> (Range<f64>, Range<f64>) {
        let points = || self.series.iter().flat_map(|s| s.points.iter());
        let (mut x_min, mut x_max) = bounds(points().map(|p| p.0)).unwrap_or((0.0, 1.0));
        if x_max <= x_min {
            x_min -= 1.0;
            x_max += 1.0;
        }
        let pad = (x_max - x_min) * 0.05;
        let (y_lo, y_hi) = bounds(points().map(|p| p.1)).unwrap_or((0.0, 1.0));
        let y_min = y_lo.min(0.0);
        let mut y_max = y_hi * 1.05;
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }
        (x_min - pad..x_max + pad, y_min..y_max)
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(draw_error)?;
        let (x_range, y_range) = self.ranges();
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .x_desc(&self.x_label)
            .y_desc(&self.y_label)
            .axis_desc_style((FONT, 18))
            .label_style((FONT, 14))
            .x_label_formatter(&|v: &f64| format!("{v:.0}"))
            .draw()
            .map_err(draw_error)?;

        for (series, &color) in self.series.iter().zip(PALETTE.iter().cycle()) {
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(draw_error)?
                .label(&series.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(2))
                });
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&point| Circle::new(point, 4, color.filled())),
                )
                .map_err(draw_error)?;
        }

        if !self.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font((FONT, 16))
                .background_style(WHITE.mix(0.9))
                .border_style(&BLACK)
                .draw()
                .map_err(draw_error)?;
        }
        root.present().map_err(draw_error)
    }

    // Packed 8-bit RGB rows, top to bottom.
    pub fn render(&self) -> Result<Vec<u8>> {
        let mut pixels = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (self.width, self.height))
                .into_drawing_area();
            self.draw(&root)?;
        }
        Ok(pixels)
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        self.draw(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::Algorithm;

    fn has_color(pixels: &[u8], color: RGBColor) -> bool {
        pixels
            .chunks_exact(3)
            .any(|px| px == [color.0, color.1, color.2])
    }

    fn single(label: &str, x_label: &str) -> LineChart {
        let mut chart = LineChart::new("Timing", x_label, "Seconds");
        chart.width = 400;
        chart.height = 300;
        chart.series.push(Series {
            label: label.into(),
            points: vec![(0.0, 0.0), (10.0, 1.0)],
        });
        chart
    }

    #[test]
    fn one_series_per_algorithm() {
        let mut results = BenchResults::new(42, 5);
        results.record(Algorithm::Insertion, 100, 0.001);
        results.record(Algorithm::Merge, 100, 0.0002);
        results.record(Algorithm::Merge, 500, 0.0011);
        let chart = LineChart::from_results(&results);
        assert_eq!(chart.series.len(), 4);
        assert_eq!(chart.series[1].label, "Merge Sort");
        assert_eq!(chart.series[1].points, vec![(100.0, 0.0002), (500.0, 0.0011)]);
        assert_eq!(chart.x_label, "Dataset size (n)");
        assert_eq!(chart.y_label, "Average execution time (seconds)");
        assert!(chart.title.contains("5 trials"));
    }

    #[test]
    fn ranges_start_at_zero_and_pad_x() {
        let chart = single("Only", "X");
        let (x, y) = chart.ranges();
        assert_eq!(x, -0.5..10.5);
        assert_eq!(y.start, 0.0);
        assert!((y.end - 1.05).abs() < 1e-12);
    }

    #[test]
    fn render_draws_series_color() {
        let chart = single("Only", "X");
        let pixels = chart.render().unwrap();
        assert_eq!(pixels.len(), 400 * 300 * 3);
        assert!(has_color(&pixels, PALETTE[0]));
        assert!(!has_color(&pixels, PALETTE[1]));
    }

    #[test]
    fn axis_labels_keep_their_case() {
        let mixed = single("Merge Sort", "Dataset size (n)").render().unwrap();
        let upper = single("Merge Sort", "DATASET SIZE (N)").render().unwrap();
        assert_ne!(mixed, upper);
    }

    #[test]
    fn render_survives_empty_and_flat_data() {
        let mut empty = LineChart::new("Empty", "X", "Y");
        empty.width = 200;
        empty.height = 150;
        assert_eq!(empty.render().unwrap().len(), 200 * 150 * 3);

        let mut flat = single("Point", "X");
        flat.series[0].points = vec![(5.0, 0.0)];
        assert!(flat.render().is_ok());
    }

    #[test]
    fn saved_chart_is_an_rgb_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        single("Only", "X").save_png(&path).unwrap();
        let image = crate::report::png::read_png(&path).unwrap();
        assert_eq!((image.width, image.height), (400, 300));
        assert_eq!(image.color_type, crate::report::png::COLOR_RGB);
    }
}
