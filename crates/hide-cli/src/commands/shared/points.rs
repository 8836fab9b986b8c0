use anyhow::{Context, bail};
use hide_core::Point;

/// Parse `"x,y x,y ..."` into grid points.
pub fn parse_points(input: &str, field: &str) -> anyhow::Result<Vec<Point>> {
    input
        .split_whitespace()
        .enumerate()
        .map(|(index, pair)| {
            parse_point(pair).with_context(|| format!("invalid {field} point #{}: '{pair}'", index + 1))
        })
        .collect()
}

/// Parse `"INDEX:x,y"` into a vertex move.
pub fn parse_move(input: &str) -> anyhow::Result<(usize, Point)> {
    let Some((index, pair)) = input.split_once(':') else {
        bail!("invalid move '{input}': expected INDEX:X,Y");
    };
    let index = index
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid vertex index in '{input}'"))?;
    let point = parse_point(pair).with_context(|| format!("invalid position in '{input}'"))?;
    Ok((index, point))
}

fn parse_point(pair: &str) -> anyhow::Result<Point> {
    let Some((x, y)) = pair.split_once(',') else {
        bail!("expected X,Y");
    };
    let x = x.trim().parse::<f64>().context("x is not a number")?;
    let y = y.trim().parse::<f64>().context("y is not a number")?;
    Ok(Point::new(x, y)?)
}
