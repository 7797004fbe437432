use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::FigureStyle;
use crate::stats::{DivisorPoint, NRange, RangeStats, RateBand, SuccessRatePoint, TimePoint};

type DrawResult<T> = std::result::Result<T, Box<dyn Error>>;
type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type XyChart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";

const LINE_BLUE: RGBColor = RGBColor(31, 119, 180);
const GRAY: RGBColor = RGBColor(128, 128, 128);
const WHEAT: RGBColor = RGBColor(245, 222, 179);
const BAR_GREEN: RGBColor = RGBColor(0, 128, 0);
const BAR_ORANGE: RGBColor = RGBColor(255, 165, 0);
const PALETTE: [RGBColor; 6] = [
    LINE_BLUE,
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

fn font(fig: &FigureStyle, points: f64) -> FontDesc<'static> {
    (FONT, fig.pt(points) as f64).into_font()
}

fn rendered(path: &Path, result: DrawResult<()>) -> Result<()> {
    result.map_err(|e| anyhow!("Failed to render {}: {}", path.display(), e))
}

/// Draw centred title lines at the top of `root` and return the remaining area.
fn titled<'a>(root: &Area<'a>, fig: &FigureStyle, lines: &[&str]) -> DrawResult<Area<'a>> {
    let size = fig.pt(14.0);
    let line_h = size + size / 4;
    let pad = fig.pt(8.0);
    let (title_area, body) = root.split_vertically(pad * 2 + line_h * lines.len() as u32);

    let (width, _) = title_area.dim_in_pixel();
    let style = TextStyle::from(font(fig, 14.0)).pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in lines.iter().enumerate() {
        let y = pad + line_h * i as u32;
        title_area.draw_text(line, &style, ((width / 2) as i32, y as i32))?;
    }
    Ok(body)
}

fn xy_chart<'a, 'b>(
    area: &'a Area<'b>,
    fig: &FigureStyle,
    x: (f64, f64),
    y: (f64, f64),
) -> DrawResult<XyChart<'a, 'b>> {
    let chart = ChartBuilder::on(area)
        .margin(fig.pt(10.0))
        .x_label_area_size(fig.pt(36.0))
        .y_label_area_size(fig.pt(48.0))
        .build_cartesian_2d(x.0..x.1, y.0..y.1)?;
    Ok(chart)
}

fn draw_mesh(chart: &mut XyChart<'_, '_>, fig: &FigureStyle, x_desc: &str, y_desc: &str) -> DrawResult<()> {
    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(font(fig, 10.0))
        .axis_desc_style(font(fig, 12.0))
        .draw()?;
    Ok(())
}

fn draw_legend<'a, 'b: 'a>(
    chart: &mut XyChart<'a, 'b>,
    fig: &FigureStyle,
    position: SeriesLabelPosition,
) -> DrawResult<()> {
    chart
        .configure_series_labels()
        .position(position)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(font(fig, 10.0))
        .draw()?;
    Ok(())
}

/// Finite min/max of `values` widened by 5% on each side.
fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return (0.0, 1.0);
    }
    let span = if hi > lo { hi - lo } else { hi.abs().max(1.0) };
    (lo - span * 0.05, hi + span * 0.05)
}

/// Finite min/max of `values`, never degenerate.
fn color_range<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn viridis(value: f64, lo: f64, hi: f64) -> RGBColor {
    ViridisRGB.get_color_normalized(value as f32, lo as f32, hi as f32)
}

fn band_color(band: RateBand) -> RGBColor {
    match band {
        RateBand::Full => BAR_GREEN,
        RateBand::Majority => BAR_ORANGE,
        RateBand::Minority => RED,
    }
}

/// Error-bar line chart of success rate against N, with reference lines at
/// 100% and at `hard_limit_n`.
pub fn plot_success_vs_n(
    points: &[SuccessRatePoint],
    hard_limit_n: u64,
    run_conditions: Option<&str>,
    fig: &FigureStyle,
    path: &Path,
) -> Result<()> {
    rendered(path, draw_success_vs_n(points, hard_limit_n, run_conditions, fig, path))
}

fn draw_success_vs_n(
    points: &[SuccessRatePoint],
    hard_limit_n: u64,
    run_conditions: Option<&str>,
    fig: &FigureStyle,
    path: &Path,
) -> DrawResult<()> {
    let root = BitMapBackend::new(path, fig.pixels()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut title = vec!["Success Rate vs N: Smooth Basis Selection"];
    title.extend(run_conditions);
    let body = titled(&root, fig, &title)?;

    let limit = hard_limit_n as f64;
    let (x_lo, x_hi) = padded_range(points.iter().map(|p| p.n as f64).chain(std::iter::once(limit)));
    let mut chart = xy_chart(&body, fig, (x_lo, x_hi), (-5.0, 105.0))?;
    draw_mesh(&mut chart, fig, "N (number to factor)", "Success Rate (%)")?;

    let stroke = fig.pt(2.0);
    let thin = fig.pt(1.0);
    let legend_len = fig.pt(20.0) as i32;

    chart
        .draw_series(points.iter().filter_map(|p| {
            p.std.map(|s| {
                ErrorBar::new_vertical(p.n as f64, p.rate - s, p.rate, p.rate + s, LINE_BLUE.stroke_width(thin), fig.pt(5.0))
            })
        }))?;
    chart
        .draw_series(
            LineSeries::new(points.iter().map(|p| (p.n as f64, p.rate)), LINE_BLUE.stroke_width(stroke))
                .point_size(fig.pt(3.0)),
        )?
        .label("Smooth basis (middle-out)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], LINE_BLUE.stroke_width(stroke)));

    let dash = fig.pt(6.0);
    let gap = fig.pt(3.0);
    chart
        .draw_series(DashedLineSeries::new(
            vec![(x_lo, 100.0), (x_hi, 100.0)],
            dash,
            gap,
            GRAY.mix(0.5).stroke_width(thin),
        ))?
        .label("100% success")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], GRAY.mix(0.5).stroke_width(thin)));
    chart
        .draw_series(DashedLineSeries::new(
            vec![(limit, -5.0), (limit, 105.0)],
            dash,
            gap,
            RED.mix(0.5).stroke_width(thin),
        ))?
        .label(format!("Hard limit (~{})", hard_limit_n))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], RED.mix(0.5).stroke_width(thin)));

    draw_legend(&mut chart, fig, SeriesLabelPosition::LowerLeft)?;
    root.present()?;
    Ok(())
}

/// Scatter of success rate against the divisor count of phi(N), coloured by
/// mean N with a colour bar.
pub fn plot_success_vs_phi_divisors(points: &[DivisorPoint], fig: &FigureStyle, path: &Path) -> Result<()> {
    rendered(path, draw_success_vs_phi_divisors(points, fig, path))
}

fn draw_success_vs_phi_divisors(points: &[DivisorPoint], fig: &FigureStyle, path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, fig.pixels()).into_drawing_area();
    root.fill(&WHITE)?;
    let body = titled(
        &root,
        fig,
        &["Non-Monotonic Difficulty: \u{3c6}(N) Structure Matters More Than Size"],
    )?;

    let (width, _) = body.dim_in_pixel();
    let (main, bar_area) = body.split_horizontally(width.saturating_sub(fig.inches(1.2)));

    let (x_lo, x_hi) = padded_range(points.iter().map(|p| p.phi_divisors as f64));
    let (n_lo, n_hi) = color_range(points.iter().map(|p| p.mean_n));

    let mut chart = xy_chart(&main, fig, (x_lo, x_hi), (-5.0, 105.0))?;
    draw_mesh(&mut chart, fig, "Number of divisors of \u{3c6}(N)", "Success Rate (%)")?;

    let radius = fig.pt(5.0);
    chart.draw_series(points.iter().map(|p| {
        Circle::new(
            (p.phi_divisors as f64, p.rate),
            radius,
            viridis(p.mean_n, n_lo, n_hi).mix(0.6).filled(),
        )
    }))?;

    let note = font(fig, 10.0);
    let pad = fig.pt(4.0) as i32;
    let line_h = fig.pt(13.0) as i32;
    let anchor = (x_lo + (x_hi - x_lo) * 0.05, 99.5);
    chart.plotting_area().draw(
        &(EmptyElement::at(anchor)
            + Rectangle::new(
                [(0, 0), (fig.inches(2.2) as i32, 2 * line_h + 2 * pad)],
                WHEAT.mix(0.5).filled(),
            )
            + Text::new("Rich divisor structure", (pad, pad), note.clone())
            + Text::new("\u{2192} easier factoring", (pad, pad + line_h), note)),
    )?;

    // Colour bar
    let mut cbar = ChartBuilder::on(&bar_area)
        .margin(fig.pt(10.0))
        .x_label_area_size(fig.pt(36.0))
        .y_label_area_size(fig.pt(40.0))
        .build_cartesian_2d(0f64..1f64, n_lo..n_hi)?;
    cbar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("N (number size)")
        .label_style(font(fig, 10.0))
        .axis_desc_style(font(fig, 12.0))
        .draw()?;

    const STEPS: usize = 128;
    let step = (n_hi - n_lo) / STEPS as f64;
    cbar.draw_series((0..STEPS).map(|i| {
        let lo = n_lo + step * i as f64;
        Rectangle::new([(0.0, lo), (1.0, lo + step)], viridis(lo + step / 2.0, n_lo, n_hi).filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Error-bar line chart of mean time to factor (seconds) against N.
pub fn plot_time_vs_n(points: &[TimePoint], fig: &FigureStyle, path: &Path) -> Result<()> {
    rendered(path, draw_time_vs_n(points, fig, path))
}

fn draw_time_vs_n(points: &[TimePoint], fig: &FigureStyle, path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, fig.pixels()).into_drawing_area();
    root.fill(&WHITE)?;
    let body = titled(&root, fig, &["Time to Factorization vs N"])?;

    let x = padded_range(points.iter().map(|p| p.n as f64));
    let y = padded_range(points.iter().flat_map(|p| {
        let s = p.std_s.unwrap_or(0.0);
        [p.mean_s - s, p.mean_s + s]
    }));
    let mut chart = xy_chart(&body, fig, x, y)?;
    draw_mesh(&mut chart, fig, "N (number to factor)", "Time to Factor (seconds)")?;

    let stroke = fig.pt(2.0);
    let legend_len = fig.pt(20.0) as i32;
    chart.draw_series(points.iter().filter_map(|p| {
        p.std_s.map(|s| {
            ErrorBar::new_vertical(
                p.n as f64,
                p.mean_s - s,
                p.mean_s,
                p.mean_s + s,
                LINE_BLUE.stroke_width(fig.pt(1.0)),
                fig.pt(5.0),
            )
        })
    }))?;
    chart
        .draw_series(
            LineSeries::new(points.iter().map(|p| (p.n as f64, p.mean_s)), LINE_BLUE.stroke_width(stroke))
                .point_size(fig.pt(3.0)),
        )?
        .label("Smooth basis")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], LINE_BLUE.stroke_width(stroke)));

    draw_legend(&mut chart, fig, SeriesLabelPosition::UpperLeft)?;
    root.present()?;
    Ok(())
}

/// Bar chart of success rate per N range, coloured by [`RateBand`] and
/// annotated with the sample count. Empty ranges keep their slot unfilled.
pub fn plot_success_by_range(stats: &[RangeStats], fig: &FigureStyle, path: &Path) -> Result<()> {
    rendered(path, draw_success_by_range(stats, fig, path))
}

fn draw_success_by_range(stats: &[RangeStats], fig: &FigureStyle, path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, fig.pixels()).into_drawing_area();
    root.fill(&WHITE)?;
    let body = titled(&root, fig, &["Success Rate by N Range"])?;

    let slots = NRange::ALL.len() as u32;
    let mut chart = ChartBuilder::on(&body)
        .margin(fig.pt(10.0))
        .x_label_area_size(fig.pt(36.0))
        .y_label_area_size(fig.pt(48.0))
        .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..105f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15))
        .x_labels(NRange::ALL.len())
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => NRange::ALL
                .get(*i as usize)
                .map(|r| r.label().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("N Range")
        .y_desc("Success Rate (%)")
        .label_style(font(fig, 10.0))
        .axis_desc_style(font(fig, 12.0))
        .draw()?;

    let side = fig.pt(14.0);
    chart.draw_series(stats.iter().enumerate().filter_map(|(i, s)| {
        let rate = s.rate()?;
        let i = i as u32;
        let color = band_color(RateBand::from_rate(rate));
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), rate)],
            color.mix(0.7).filled(),
        );
        bar.set_margin(0, 0, side, side);
        Some(bar)
    }))?;

    let count_style = TextStyle::from(font(fig, 10.0)).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(stats.iter().enumerate().filter_map(|(i, s)| {
        let rate = s.rate()?;
        Some(Text::new(
            format!("n={}", s.count),
            (SegmentValue::CenterOf(i as u32), rate + 3.0),
            count_style.clone(),
        ))
    }))?;

    root.present()?;
    Ok(())
}

/// One success-rate line per strategy.
pub fn plot_strategy_comparison(
    curves: &BTreeMap<String, Vec<SuccessRatePoint>>,
    fig: &FigureStyle,
    path: &Path,
) -> Result<()> {
    rendered(path, draw_strategy_comparison(curves, fig, path))
}

fn draw_strategy_comparison(
    curves: &BTreeMap<String, Vec<SuccessRatePoint>>,
    fig: &FigureStyle,
    path: &Path,
) -> DrawResult<()> {
    let root = BitMapBackend::new(path, fig.pixels()).into_drawing_area();
    root.fill(&WHITE)?;
    let body = titled(&root, fig, &["Success Rate vs N by Strategy"])?;

    let x = padded_range(curves.values().flatten().map(|p| p.n as f64));
    let mut chart = xy_chart(&body, fig, x, (-5.0, 105.0))?;
    draw_mesh(&mut chart, fig, "N (number to factor)", "Success Rate (%)")?;

    let stroke = fig.pt(2.0);
    let legend_len = fig.pt(20.0) as i32;
    for (idx, (strategy, points)) in curves.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        chart
            .draw_series(
                LineSeries::new(points.iter().map(|p| (p.n as f64, p.rate)), color.stroke_width(stroke))
                    .point_size(fig.pt(3.0)),
            )?
            .label(strategy.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], color.stroke_width(stroke)));
    }

    draw_legend(&mut chart, fig, SeriesLabelPosition::LowerLeft)?;
    root.present()?;
    Ok(())
}
