//! Bar charts for the offensive keyword table and the offensive ratio.

use plotters::prelude::*;

use crate::AnalysisError;
use crate::wordcloud::chart_err;

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 400;

const BAR_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

///Renders one vertical bar per `(label, count)` entry, in the given order, as an SVG
///document. `rows` must not be empty.
pub fn bar_chart_svg(title: &str, rows: &[(&str, usize)]) -> Result<String, AnalysisError> {
    if rows.is_empty() {
        return Err(AnalysisError::Chart(format!("no data for chart {title:?}")));
    }
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let y_top = max + max / 10 + 1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22.0))
            .margin(10)
            .x_label_area_size(60)
            .y_label_area_size(50)
            .build_cartesian_2d((0..rows.len()).into_segmented(), 0..y_top)
            .map_err(chart_err)?;

        let label_of = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => rows.get(*i).map(|(l, _)| l.to_string()).unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len() + 1)
            .x_label_formatter(&label_of)
            .y_desc("count")
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(8)
                    .data(rows.iter().enumerate().map(|(i, (_, c))| (i, *c))),
            )
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}
