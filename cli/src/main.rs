mod commands;
mod tessellate;

use clap::{App, Arg, ArgMatches, SubCommand};
use commands::*;

use ribbon::math::{point, Point};
use ribbon::path::StrokeStyle;

use std::fs::File;
use std::io::{stdout, Read};

fn stroke_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(
        Arg::with_name("WIDTH")
            .short("w")
            .long("width")
            .help("Sets the stroke width (1.0 by default)")
            .value_name("WIDTH")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("ARC_RADIUS")
            .short("r")
            .long("arc-radius")
            .help("Sets the outer radius of rounded corners (the stroke radius by default)")
            .value_name("RADIUS")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("SHARP")
            .short("s")
            .long("sharp")
            .help("Uses sharp corners instead of rounded ones"),
    )
    .arg(
        Arg::with_name("LOOP")
            .short("l")
            .long("loop")
            .help("Connects the last point to the first one"),
    )
    .arg(
        Arg::with_name("COLOR")
            .short("c")
            .long("color")
            .help("Sets the stroke color as #rrggbb or #rrggbbaa (black by default)")
            .value_name("COLOR")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("EDGE_BLEND")
            .short("b")
            .long("edge-blend")
            .help("Sets the width of the antialiasing falloff in pixels (1.0 by default)")
            .value_name("PIXELS")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("ZOOM")
            .short("z")
            .long("zoom")
            .help("Sets the zoom factor (1.0 by default)")
            .value_name("ZOOM")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("DOT")
            .short("d")
            .long("dot")
            .help("Adds a dot at x,y with the stroke width as diameter")
            .value_name("POINT")
            .takes_value(true)
            .multiple(true)
            .number_of_values(1),
    )
}

fn main() {
    env_logger::init();

    let matches = App::new("Ribbon command-line interface")
        .version("0.1")
        .about("Stroke tessellator")
        .subcommand(stroke_args(
            SubCommand::with_name("tessellate")
                .about("Tessellates a path and prints the vertices and indices")
                .arg(
                    Arg::with_name("COUNT")
                        .long("count")
                        .help("Prints the number of triangles and vertices"),
                ),
        ))
        .subcommand(stroke_args(
            SubCommand::with_name("render")
                .about("Renders a path with a headless backend and prints the draw calls")
                .arg(
                    Arg::with_name("VIEWPORT")
                        .long("viewport")
                        .help("Sets the size of the render target in pixels (800,600 by default)")
                        .value_name("W,H")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("CENTER")
                        .long("center")
                        .help("Sets the point the camera looks at (0,0 by default)")
                        .value_name("X,Y")
                        .takes_value(true),
                ),
        ))
        .arg(
            Arg::with_name("POINTS")
                .value_name("POINTS")
                .help("The points of the path, as x,y pairs separated by spaces")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Reads the points from a file")
                .short("i")
                .long("input")
                .value_name("FILE")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    let mut input_buffer = matches.value_of("POINTS").unwrap_or("").to_string();

    if let Some(input_file) = matches.value_of("INPUT") {
        let mut file =
            File::open(input_file).map_err(|e| format!("Cannot open file {}: {}", input_file, e))?;
        input_buffer.push(' ');
        file.read_to_string(&mut input_buffer)
            .map_err(|e| format!("Cannot read file {}: {}", input_file, e))?;
    }

    let output: Box<dyn std::io::Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => Box::new(
            File::create(output_file)
                .map_err(|e| format!("Cannot create file {}: {}", output_file, e))?,
        ),
        None => Box::new(stdout()),
    };

    let points = parse_points(&input_buffer).map_err(|e| e.0)?;

    if let Some(tess_matches) = matches.subcommand_matches("tessellate") {
        let cmd = TessellateCmd {
            stroke: get_stroke_cmd(points, tess_matches)?,
            output,
            count: tess_matches.is_present("COUNT"),
        };

        tessellate::tessellate(cmd).map_err(|e| e.to_string())
    } else if let Some(render_matches) = matches.subcommand_matches("render") {
        let viewport = match render_matches.value_of("VIEWPORT") {
            Some(src) => parse_point(src).map_err(|e| e.0)?,
            None => point(800.0, 600.0),
        };
        let center = match render_matches.value_of("CENTER") {
            Some(src) => parse_point(src).map_err(|e| e.0)?,
            None => point(0.0, 0.0),
        };

        let cmd = RenderCmd {
            stroke: get_stroke_cmd(points, render_matches)?,
            output,
            width: viewport.x,
            height: viewport.y,
            center,
        };

        tessellate::render(cmd).map_err(|e| e.to_string())
    } else {
        Err(matches.usage().to_string())
    }
}

fn get_number(matches: &ArgMatches, name: &str, default: f32) -> Result<f32, String> {
    match matches.value_of(name) {
        Some(src) => parse_number(src).map_err(|e| e.0),
        None => Ok(default),
    }
}

fn get_stroke_cmd(points: Vec<Point>, matches: &ArgMatches) -> Result<StrokeCmd, String> {
    let mut style = StrokeStyle::DEFAULT
        .with_width(get_number(matches, "WIDTH", StrokeStyle::DEFAULT_WIDTH)?)
        .with_sharp_joins(matches.is_present("SHARP"))
        .with_edge_blend(get_number(
            matches,
            "EDGE_BLEND",
            StrokeStyle::DEFAULT_EDGE_BLEND,
        )?);

    if let Some(radius) = matches.value_of("ARC_RADIUS") {
        style = style.with_arc_radius(parse_number(radius).map_err(|e| e.0)?);
    }

    if let Some(color) = matches.value_of("COLOR") {
        style = style.with_color(parse_color(color).map_err(|e| e.0)?);
    }

    let mut dots = Vec::new();
    if let Some(values) = matches.values_of("DOT") {
        for src in values {
            dots.push(parse_point(src).map_err(|e| e.0)?);
        }
    }

    Ok(StrokeCmd {
        points,
        closed: matches.is_present("LOOP"),
        style,
        dots,
        zoom: get_number(matches, "ZOOM", 1.0)?,
    })
}
