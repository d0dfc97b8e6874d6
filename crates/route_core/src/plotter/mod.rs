//! # Route Plotter
//!
//! Renders route sequences as SVG paths on a football field.
//!
//! - [`RoutePlotter::render_play`]: every route of a play, colored per
//!   player, with direction arrows, ball landing star and optional tags
//! - [`RoutePlotter::render_route`]: one player's trajectory with start and
//!   end markers
//!
//! Rendering goes through the `plotters` SVG backend into a `String`;
//! [`save_svg`] writes it out.

pub mod field;
pub mod shapes;

use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::annotations::PlayAnnotations;
use crate::config::{HexColor, RenderConfig};
use crate::error::{Result, TrajectoryError};
use crate::loader::RouteMap;
use crate::models::{FieldPoint, PlayKey, RouteSequence};

use field::{draw_field, PLAY_VIEW_X, PLAY_VIEW_Y, ROUTE_VIEW_X, ROUTE_VIEW_Y};
use shapes::{arrow_head, route_color, star};

/// Width of the tag panel on the right, in pixels
const TAG_PANEL_WIDTH: u32 = 200;
const FONT_FAMILY: &str = "sans-serif";

pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> TrajectoryError {
    TrajectoryError::Render(e.to_string())
}

pub(crate) fn rgb(color: HexColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn font(size: f64, color: &RGBColor) -> TextStyle<'static> {
    (FONT_FAMILY, size).into_font().color(color)
}

fn bold_font(size: f64, color: &RGBColor) -> TextStyle<'static> {
    (FONT_FAMILY, size, FontStyle::Bold).into_font().color(color)
}

/// One labelled path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl From<&RouteSequence> for Trajectory {
    fn from(route: &RouteSequence) -> Self {
        Self { label: route.label(), points: route.points() }
    }
}

/// Everything drawn in a play plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlotRequest {
    pub play: Option<PlayKey>,
    pub trajectories: Vec<Trajectory>,
    pub ball_land: Option<FieldPoint>,
    pub annotations: PlayAnnotations,
}

impl PlotRequest {
    pub fn new(play: Option<PlayKey>) -> Self {
        Self { play, ..Default::default() }
    }

    pub fn from_routes(play: Option<PlayKey>, routes: &[&RouteSequence]) -> Self {
        Self {
            play,
            trajectories: routes.iter().map(|r| Trajectory::from(*r)).collect(),
            ..Default::default()
        }
    }

    /// Routes, ball landing and known pass outcome of one loaded play.
    pub fn for_play(map: &RouteMap, play: PlayKey, offense_only: bool) -> Self {
        let routes = if offense_only {
            map.offensive_routes_for_play(play)
        } else {
            map.routes_for_play(play)
        };
        let landing = map.ball_landing(play);

        let mut request = Self::from_routes(Some(play), &routes);
        request.ball_land = landing.map(|b| b.position);
        request.annotations.outcome = landing.and_then(|b| b.outcome);
        request
    }

    pub fn with_trajectory(mut self, label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        self.trajectories.push(Trajectory { label: label.into(), points });
        self
    }

    pub fn with_ball_land(mut self, spot: FieldPoint) -> Self {
        self.ball_land = Some(spot);
        self
    }

    /// Replace the tags; an outcome already known from the data is kept when
    /// the new tags leave it unset.
    pub fn with_annotations(mut self, annotations: PlayAnnotations) -> Self {
        let outcome = annotations.outcome.or(self.annotations.outcome);
        self.annotations = PlayAnnotations { outcome, ..annotations };
        self
    }

    pub fn title(&self) -> String {
        match self.play {
            Some(play) => play.to_string(),
            None => "Player Trajectories".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoutePlotter {
    config: RenderConfig,
}

impl RoutePlotter {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw every trajectory of the request. An empty request still yields
    /// the field.
    pub fn render_play(&self, request: &PlotRequest) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.config.width, self.config.height))
                .into_drawing_area();
            self.draw_play(&root, request)?;
            root.present().map_err(render_err)?;
        }

        info!(
            title = %request.title(),
            routes = request.trajectories.len(),
            bytes = svg.len(),
            "play rendered"
        );
        Ok(svg)
    }

    /// Draw one route with start/end markers.
    pub fn render_route(&self, route: &RouteSequence, play: Option<PlayKey>) -> Result<String> {
        let title = match play {
            Some(play) => play.to_string(),
            None => "Player Trajectory".to_string(),
        };

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.config.width, self.config.height))
                .into_drawing_area();
            self.draw_route(&root, &route.points(), &title)?;
            root.present().map_err(render_err)?;
        }

        info!(route = %route.key(), frames = route.len(), "route rendered");
        Ok(svg)
    }

    fn draw_play(&self, root: &DrawingArea<SVGBackend<'_>, Shift>, request: &PlotRequest) -> Result<()> {
        let cfg = &self.config;
        let text_color = rgb(cfg.line_color);
        let background = rgb(cfg.figure_background);

        root.fill(&background).map_err(render_err)?;

        // Narrow canvases keep the full width for the field; tags are then
        // drawn over the plot once everything else is in place.
        let tags = request.annotations.caption_lines();
        let overlay_tags = !tags.is_empty() && cfg.width <= TAG_PANEL_WIDTH * 2;
        let plot_area = if tags.is_empty() || overlay_tags {
            root.clone()
        } else {
            let (plot_area, tag_panel) = root.split_horizontally(cfg.width - TAG_PANEL_WIDTH);
            draw_tags(&tag_panel, &tags, &text_color)?;
            plot_area
        };

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(
                request.title(),
                bold_font(f64::from(cfg.title_font_size), &text_color),
            )
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(45)
            .build_cartesian_2d(PLAY_VIEW_X.0..PLAY_VIEW_X.1, PLAY_VIEW_Y.0..PLAY_VIEW_Y.1)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("X (yards)")
            .y_desc("Y (yards)")
            .axis_style(&text_color)
            .label_style(font(12.0, &text_color))
            .axis_desc_style(font(14.0, &text_color))
            .draw()
            .map_err(render_err)?;

        draw_field(&mut chart, cfg)?;

        for (index, trajectory) in request.trajectories.iter().enumerate() {
            let color = rgb(route_color(index));
            debug!(label = %trajectory.label, points = trajectory.points.len(), "drawing route");

            let series = chart
                .draw_series(LineSeries::new(
                    trajectory.points.iter().copied(),
                    color.stroke_width(cfg.route_line_width),
                ))
                .map_err(render_err)?;
            if cfg.show_legend {
                series.label(trajectory.label.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
            }

            chart
                .draw_series(
                    trajectory
                        .points
                        .iter()
                        .map(|&p| Circle::new(p, cfg.marker_size, color.filled())),
                )
                .map_err(render_err)?;

            if let Some(head) =
                arrow_head(&trajectory.points, cfg.arrow_head_length, cfg.arrow_head_width)
            {
                chart
                    .draw_series(std::iter::once(Polygon::new(head.to_vec(), color.filled())))
                    .map_err(render_err)?;
            }
        }

        if let Some(ball) = request.ball_land {
            let ball_color = rgb(cfg.ball_color);
            let outline = star(ball.as_tuple(), cfg.ball_marker_radius);

            let series = chart
                .draw_series(std::iter::once(Polygon::new(outline.clone(), ball_color.filled())))
                .map_err(render_err)?;
            if cfg.show_legend {
                series
                    .label("Ball Landing")
                    .legend(move |(x, y)| Circle::new((x, y), 5, ball_color.filled()));
            }

            let mut closed = outline;
            closed.push(closed[0]);
            chart
                .draw_series(std::iter::once(PathElement::new(closed, BLACK.stroke_width(2))))
                .map_err(render_err)?;
        }

        let has_labels = !request.trajectories.is_empty() || request.ball_land.is_some();
        if cfg.show_legend && has_labels {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&background.mix(0.9))
                .border_style(&text_color)
                .label_font(font(12.0, &text_color))
                .draw()
                .map_err(render_err)?;
        }

        if overlay_tags {
            debug!(width = cfg.width, "canvas too narrow for tag panel, overlaying tags");
            draw_tags(root, &tags, &text_color)?;
        }

        Ok(())
    }

    fn draw_route(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        points: &[(f64, f64)],
        title: &str,
    ) -> Result<()> {
        let path_color = RGBColor(0x1f, 0x3f, 0xff);

        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(root)
            .caption(title, font(f64::from(self.config.title_font_size), &BLACK))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(45)
            .build_cartesian_2d(ROUTE_VIEW_X.0..ROUTE_VIEW_X.1, ROUTE_VIEW_Y.0..ROUTE_VIEW_Y.1)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .light_line_style(&BLACK.mix(0.05))
            .bold_line_style(&BLACK.mix(0.3))
            .x_desc("X (yards)")
            .y_desc("Y (yards)")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), path_color.stroke_width(1)))
            .map_err(render_err)?;
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, path_color.filled())))
            .map_err(render_err)?;

        if let (Some(&start), Some(&end)) = (points.first(), points.last()) {
            chart
                .draw_series(std::iter::once(Circle::new(start, 7, GREEN.filled())))
                .map_err(render_err)?
                .label("Start")
                .legend(|(x, y)| Circle::new((x, y), 5, GREEN.filled()));
            chart
                .draw_series(std::iter::once(Circle::new(end, 7, RED.filled())))
                .map_err(render_err)?
                .label("End")
                .legend(|(x, y)| Circle::new((x, y), 5, RED.filled()));

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font(font(12.0, &BLACK))
                .draw()
                .map_err(render_err)?;
        }

        Ok(())
    }
}

fn draw_tags(
    panel: &DrawingArea<SVGBackend<'_>, Shift>,
    lines: &[String],
    color: &RGBColor,
) -> Result<()> {
    let heading = bold_font(15.0, color);
    panel
        .draw(&Text::new("Play Tags", (10, 50), heading))
        .map_err(render_err)?;

    for (i, line) in lines.iter().enumerate() {
        let y = 80 + i as i32 * 22;
        panel
            .draw(&Text::new(line.as_str(), (10, y), font(13.0, color)))
            .map_err(render_err)?;
    }
    Ok(())
}

/// Write an SVG document, creating parent directories as needed.
pub fn save_svg(path: &Path, svg: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, svg)?;
    info!(path = %path.display(), bytes = svg.len(), "svg written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{PocketType, RouteConcept};
    use crate::loader::TrajectoryLoader;
    use crate::models::{PassOutcome, RouteKey, TrackingRecord};

    const GAME: u64 = 2023090700;

    fn sample_map() -> RouteMap {
        let mut records = Vec::new();
        for frame in 1..=5u32 {
            let mut qb = TrackingRecord::at(GAME, 101, 10, frame, 40.0 - frame as f64, 26.0);
            qb.player_name = Some("Patrick Mahomes".to_string());
            qb.player_role = Some("Passer".to_string());
            qb.ball_land_x = Some(62.0);
            qb.ball_land_y = Some(10.5);
            records.push(qb);

            let mut wr = TrackingRecord::at(GAME, 101, 20, frame, 42.0 + 3.0 * frame as f64, 12.0);
            wr.player_name = Some("Travis Kelce".to_string());
            wr.player_role = Some("Targeted Receiver".to_string());
            records.push(wr);

            let mut cb = TrackingRecord::at(GAME, 101, 30, frame, 50.0 + 2.0 * frame as f64, 14.0);
            cb.player_name = Some("Jaire Alexander".to_string());
            cb.player_role = Some("Defensive Coverage".to_string());
            records.push(cb);
        }
        TrajectoryLoader::new().load(records).unwrap()
    }

    #[test]
    fn test_request_for_play() {
        let mut map = sample_map();
        let play = PlayKey::new(GAME, 101);
        map.set_pass_outcome(play, PassOutcome::Completion);

        let request = PlotRequest::for_play(&map, play, false);
        assert_eq!(request.trajectories.len(), 3);
        assert_eq!(request.ball_land, Some(FieldPoint::new(62.0, 10.5)));
        assert_eq!(request.annotations.outcome, Some(PassOutcome::Completion));
        assert_eq!(request.title(), "Game: 2023090700, Play: 101");

        let offense = PlotRequest::for_play(&map, play, true);
        let labels: Vec<&str> = offense.trajectories.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Patrick Mahomes", "Travis Kelce"]);

        let tagged = request.with_annotations(PlayAnnotations {
            blitz: Some(false),
            ..Default::default()
        });
        assert_eq!(tagged.annotations.outcome, Some(PassOutcome::Completion));
        assert_eq!(tagged.annotations.blitz, Some(false));
    }

    #[test]
    fn test_render_play_svg() {
        let map = sample_map();
        let request = PlotRequest::for_play(&map, PlayKey::new(GAME, 101), false).with_annotations(
            PlayAnnotations {
                pocket: Some(PocketType::Clean),
                route_concept: Some(RouteConcept::Flood),
                ..Default::default()
            },
        );

        let svg = RoutePlotter::default().render_play(&request).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Game: 2023090700, Play: 101"));
        assert!(svg.contains("Travis Kelce"));
        assert!(svg.contains("Ball Landing"));
        assert!(svg.contains("Pocket: Clean"));
        assert!(svg.contains("Concept: Flood"));
    }

    #[test]
    fn test_render_narrow_canvas_keeps_tags() {
        let map = sample_map();
        let request = PlotRequest::for_play(&map, PlayKey::new(GAME, 101), false).with_annotations(
            PlayAnnotations {
                pocket: Some(PocketType::Clean),
                blitz: Some(true),
                ..Default::default()
            },
        );

        let config = RenderConfig { width: 400, ..RenderConfig::default() };
        let svg = RoutePlotter::new(config).unwrap().render_play(&request).unwrap();
        assert!(svg.contains("Travis Kelce"));
        assert!(svg.contains("Play Tags"));
        assert!(svg.contains("Pocket: Clean"));
        assert!(svg.contains("Blitz: Yes"));
    }

    #[test]
    fn test_render_empty_request() {
        let svg = RoutePlotter::default().render_play(&PlotRequest::new(None)).unwrap();
        assert!(svg.contains("Player Trajectories"));
        assert!(!svg.contains("Ball Landing"));
    }

    #[test]
    fn test_render_single_point_route() {
        let request = PlotRequest::new(None).with_trajectory("Lone", vec![(30.0, 20.0)]);
        let svg = RoutePlotter::default().render_play(&request).unwrap();
        assert!(svg.contains("Lone"));
    }

    #[test]
    fn test_render_route() {
        let map = sample_map();
        let route = map.get(&RouteKey::new(GAME, 101, 20)).unwrap();
        let plotter = RoutePlotter::default();

        let svg = plotter.render_route(route, None).unwrap();
        assert!(svg.contains("Player Trajectory"));
        assert!(svg.contains("Start"));
        assert!(svg.contains("End"));

        let titled = plotter.render_route(route, Some(route.key().play)).unwrap();
        assert!(titled.contains("Game: 2023090700, Play: 101"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig { height: 0, ..RenderConfig::default() };
        assert!(RoutePlotter::new(config).is_err());
    }

    #[test]
    fn test_save_svg_creates_dirs() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("plots").join("play.svg");
        save_svg(&path, "<svg/>")?;
        assert_eq!(fs::read_to_string(&path)?, "<svg/>");
        Ok(())
    }
}
