//! Bar chart of sentiment counts.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::error::ReportError;
use crate::models::SentimentCount;

const CHART_SIZE: (u32, u32) = (1000, 700);
const CHART_TITLE: &str = "Sentiment Analysis Distribution";

const GREY: RGBColor = RGBColor(128, 128, 128);
const GREEN_BAR: RGBColor = RGBColor(0, 128, 0);

/// Bar color for a sentiment label; unknown labels are blue.
pub fn bar_color(label: &str) -> RGBColor {
    match label {
        "Positive" => GREEN_BAR,
        "Negative" => RED,
        "Neutral" => GREY,
        _ => BLUE,
    }
}

/// Render `counts` as an SVG bar chart at `path`, bars in the given order.
pub fn render_chart(counts: &[SentimentCount], path: &Path) -> Result<(), ReportError> {
    if counts.is_empty() {
        return Err(ReportError::NoRows);
    }
    draw(counts, path).map_err(|e| ReportError::ChartError(e.to_string()))
}

fn draw(counts: &[SentimentCount], path: &Path) -> Result<(), Box<dyn Error>> {
    let labels: Vec<&str> = counts.iter().map(|c| c.label.as_str()).collect();
    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let y_max = max_count + (max_count / 10).max(1);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..labels.len() as u32).into_segmented(), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Sentiment")
        .y_desc("Number of Comments")
        .axis_desc_style(("sans-serif", 24))
        .label_style(("sans-serif", 20))
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, c)| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), c.count)],
            bar_color(&c.label).filled(),
        );
        bar.set_margin(0, 0, 12, 12);
        bar
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_colors() {
        assert_eq!(bar_color("Positive"), GREEN_BAR);
        assert_eq!(bar_color("Negative"), RED);
        assert_eq!(bar_color("Neutral"), GREY);
        assert_eq!(bar_color("Mixed"), BLUE);
    }

    #[test]
    fn test_render_chart_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let counts = vec![
            SentimentCount {
                label: "Positive".to_string(),
                count: 3,
            },
            SentimentCount {
                label: "Negative".to_string(),
                count: 1,
            },
        ];
        render_chart(&counts, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(CHART_TITLE));
    }

    #[test]
    fn test_render_chart_empty() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_chart(&[], &dir.path().join("chart.svg"));
        assert!(matches!(result, Err(ReportError::NoRows)));
    }
}
