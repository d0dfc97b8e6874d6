//! Football field geometry (yards) and the field backdrop.

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use crate::config::RenderConfig;
use crate::error::Result;

use super::{render_err, rgb};

/// Playing surface length drawn as the main field (x-axis)
pub const FIELD_LENGTH: f64 = 120.0;
/// Sideline to sideline (y-axis)
pub const FIELD_WIDTH: f64 = 53.3;
/// End zone depth
pub const ENDZONE_DEPTH: f64 = 10.0;
/// Yard line spacing
pub const YARD_LINE_STEP: usize = 10;

/// Visible range for multi-route plots
pub const PLAY_VIEW_X: (f64, f64) = (-10.0, 130.0);
pub const PLAY_VIEW_Y: (f64, f64) = (-5.0, 58.3);

/// Visible range for single-route plots
pub const ROUTE_VIEW_X: (f64, f64) = (-5.0, 125.0);
pub const ROUTE_VIEW_Y: (f64, f64) = (-5.0, 58.0);

pub(super) type FieldChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Field, end zones, yard lines and sidelines, bottom layer first.
pub(super) fn draw_field(chart: &mut FieldChart<'_, '_>, config: &RenderConfig) -> Result<()> {
    let field = rgb(config.field_color);
    let endzone = rgb(config.endzone_color);
    let line = rgb(config.line_color);

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(0.0, 0.0), (FIELD_LENGTH, FIELD_WIDTH)],
            field.filled(),
        )))
        .map_err(render_err)?;

    chart
        .draw_series([
            Rectangle::new([(-ENDZONE_DEPTH, 0.0), (0.0, FIELD_WIDTH)], endzone.filled()),
            Rectangle::new(
                [(FIELD_LENGTH, 0.0), (FIELD_LENGTH + ENDZONE_DEPTH, FIELD_WIDTH)],
                endzone.filled(),
            ),
        ])
        .map_err(render_err)?;

    chart
        .draw_series((0..=FIELD_LENGTH as usize).step_by(YARD_LINE_STEP).map(|yard| {
            let x = yard as f64;
            PathElement::new(vec![(x, 0.0), (x, FIELD_WIDTH)], line.mix(0.5).stroke_width(1))
        }))
        .map_err(render_err)?;

    chart
        .draw_series([
            PathElement::new(vec![(0.0, 0.0), (FIELD_LENGTH, 0.0)], line.stroke_width(2)),
            PathElement::new(
                vec![(0.0, FIELD_WIDTH), (FIELD_LENGTH, FIELD_WIDTH)],
                line.stroke_width(2),
            ),
        ])
        .map_err(render_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yard_lines_cover_field() {
        let yards: Vec<usize> = (0..=FIELD_LENGTH as usize).step_by(YARD_LINE_STEP).collect();
        assert_eq!(yards.first(), Some(&0));
        assert_eq!(yards.last(), Some(&120));
        assert_eq!(yards.len(), 13);
    }

    #[test]
    fn test_views_contain_field() {
        assert!(PLAY_VIEW_X.0 <= -ENDZONE_DEPTH && PLAY_VIEW_X.1 >= FIELD_LENGTH + ENDZONE_DEPTH);
        assert!(ROUTE_VIEW_X.0 < 0.0 && ROUTE_VIEW_X.1 > FIELD_LENGTH);
        assert!(PLAY_VIEW_Y.1 > FIELD_WIDTH && ROUTE_VIEW_Y.1 > FIELD_WIDTH);
    }
}
