use ribbon::math::{point, Point};
use ribbon::path::{Color, StrokeStyle};
use std::io;

pub struct StrokeCmd {
    pub points: Vec<Point>,
    pub closed: bool,
    pub style: StrokeStyle,
    pub dots: Vec<Point>,
    pub zoom: f32,
}

pub struct TessellateCmd {
    pub stroke: StrokeCmd,
    pub output: Box<dyn io::Write>,
    pub count: bool,
}

pub struct RenderCmd {
    pub stroke: StrokeCmd,
    pub output: Box<dyn io::Write>,
    pub width: f32,
    pub height: f32,
    pub center: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParseError(pub String);

/// Parses a list of whitespace-separated `x,y` pairs.
pub fn parse_points(src: &str) -> Result<Vec<Point>, ParseError> {
    src.split_whitespace().map(parse_point).collect()
}

pub fn parse_point(src: &str) -> Result<Point, ParseError> {
    let mut coords = src.split(',');
    let (x, y) = match (coords.next(), coords.next(), coords.next()) {
        (Some(x), Some(y), None) => (x, y),
        _ => return Err(ParseError(format!("Expected x,y but got {:?}", src))),
    };

    Ok(point(parse_number(x)?, parse_number(y)?))
}

pub fn parse_number(src: &str) -> Result<f32, ParseError> {
    src.trim()
        .parse()
        .map_err(|_| ParseError(format!("Invalid number {:?}", src)))
}

/// Parses `#rrggbb` or `#rrggbbaa`, the `#` being optional.
pub fn parse_color(src: &str) -> Result<Color, ParseError> {
    let hex = src.trim_start_matches('#');
    let err = || ParseError(format!("Invalid color {:?}", src));

    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(err());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| err());

    let a = if hex.len() == 8 { channel(3)? } else { 255 };

    Ok(Color::from_rgba8(channel(0)?, channel(1)?, channel(2)?, a))
}

#[test]
fn parse_point_list() {
    assert_eq!(
        parse_points("0,0  10,0\n10.5,-3"),
        Ok(vec![point(0.0, 0.0), point(10.0, 0.0), point(10.5, -3.0)])
    );
    assert_eq!(parse_points(""), Ok(Vec::new()));
    assert!(parse_points("0,0 1").is_err());
    assert!(parse_points("0,0,0").is_err());
    assert!(parse_points("a,0").is_err());
}

#[test]
fn parse_colors() {
    assert_eq!(parse_color("#ff0000"), Ok(Color::RED));
    assert_eq!(parse_color("0000ff00"), Ok(Color::rgba(0.0, 0.0, 1.0, 0.0)));
    assert!(parse_color("#ff00").is_err());
    assert!(parse_color("#gg0000").is_err());
}
