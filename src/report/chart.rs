//! Weight progress chart
//!
//! Renders weight over time as a PNG: the weight series with point
//! markers plus a horizontal reference line for each crossed milestone.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::analytics::{milestone_crossings, WeightSample};

/// Generate the weight progress chart as PNG bytes
pub fn generate_weight_chart(
    samples: &[WeightSample],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    if samples.len() < 2 {
        return Err("Not enough weight data to chart".to_string());
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        // Calculate Y axis range
        let y_min = samples
            .iter()
            .map(|s| s.weight)
            .fold(f64::INFINITY, f64::min)
            - 10.0;
        let y_max = samples
            .iter()
            .map(|s| s.weight)
            .fold(f64::NEG_INFINITY, f64::max)
            + 10.0;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..(samples.len() as i32), y_min..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_labels(samples.len().min(10))
            .x_label_formatter(&|x| {
                if *x >= 0 && (*x as usize) < samples.len() {
                    samples[*x as usize].timestamp.format("%m-%d").to_string()
                } else {
                    String::new()
                }
            })
            .y_desc("Weight (lbs)")
            .draw()
            .map_err(|e| e.to_string())?;

        // Milestone reference lines
        for crossing in milestone_crossings(samples) {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![
                        (0, crossing.milestone as f64),
                        (samples.len() as i32, crossing.milestone as f64),
                    ],
                    ShapeStyle::from(&RGBColor(0, 176, 80).mix(0.4)).stroke_width(1),
                )))
                .map_err(|e| e.to_string())?;
        }

        // Weight line with point markers
        let points: Vec<(i32, f64)> = samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i as i32, s.weight))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), BLUE.stroke_width(2)))
            .map_err(|e| e.to_string())?
            .label("Weight")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

        chart
            .draw_series(
                points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, BLUE.filled())),
            )
            .map_err(|e| e.to_string())?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    // Convert RGB buffer to PNG
    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    let dyn_img = DynamicImage::ImageRgb8(img);
    dyn_img
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

/// Render the weight progress chart to a PNG file
pub fn render_weight_chart_file<P: AsRef<Path>>(
    path: P,
    samples: &[WeightSample],
    width: u32,
    height: u32,
) -> Result<(), String> {
    let png_bytes = generate_weight_chart(samples, width, height)?;
    std::fs::write(path.as_ref(), png_bytes).map_err(|e| e.to_string())
}
