//! Coastline outlines loaded from GeoJSON.
//!
//! Any LineString, MultiLineString, Polygon or MultiPolygon geometry is
//! accepted, alone or inside Features, FeatureCollections and
//! GeometryCollections. Polygon rings are drawn as closed lines.

use std::path::Path;

use serde_json::Value;

use projection::MapProjection;

use crate::canvas::{Canvas, LineStyle};
use crate::error::{RenderError, RenderResult};
use crate::panel::Panel;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coastlines {
    lines: Vec<Vec<(f64, f64)>>,
}

impl Coastlines {
    pub fn new(lines: Vec<Vec<(f64, f64)>>) -> Self {
        Self { lines }
    }

    pub fn from_geojson_str(json: &str) -> RenderResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| RenderError::Coastline(e.to_string()))?;
        let mut lines = Vec::new();
        collect_lines(&value, &mut lines)?;
        Ok(Self { lines })
    }

    pub fn from_file(path: &Path) -> RenderResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let coastlines = Self::from_geojson_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            lines = coastlines.len(),
            "Loaded coastlines"
        );
        Ok(coastlines)
    }

    pub fn lines(&self) -> &[Vec<(f64, f64)>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn draw(&self, canvas: &mut Canvas, panel: &Panel, projection: &dyn MapProjection, style: &LineStyle) {
        for line in &self.lines {
            for piece in panel.project_path(projection, line) {
                canvas.stroke_polyline(&piece, style);
            }
        }
    }
}

fn collect_lines(value: &Value, out: &mut Vec<Vec<(f64, f64)>>) -> RenderResult<()> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| RenderError::Coastline("object without a \"type\"".to_string()))?;

    match kind {
        "FeatureCollection" => {
            for feature in array_field(value, "features")? {
                collect_lines(feature, out)?;
            }
        }
        "Feature" => match value.get("geometry") {
            Some(Value::Null) | None => {}
            Some(geometry) => collect_lines(geometry, out)?,
        },
        "GeometryCollection" => {
            for geometry in array_field(value, "geometries")? {
                collect_lines(geometry, out)?;
            }
        }
        "LineString" => out.push(positions(coordinates(value)?)?),
        "MultiLineString" | "Polygon" => {
            for line in as_array(coordinates(value)?)? {
                out.push(positions(line)?);
            }
        }
        "MultiPolygon" => {
            for polygon in as_array(coordinates(value)?)? {
                for ring in as_array(polygon)? {
                    out.push(positions(ring)?);
                }
            }
        }
        // Points carry no outline.
        "Point" | "MultiPoint" => {}
        other => {
            return Err(RenderError::Coastline(format!(
                "unsupported GeoJSON type '{}'",
                other
            )))
        }
    }
    Ok(())
}

fn array_field<'a>(value: &'a Value, field: &str) -> RenderResult<&'a Vec<Value>> {
    value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| RenderError::Coastline(format!("missing array \"{}\"", field)))
}

fn coordinates(value: &Value) -> RenderResult<&Value> {
    value
        .get("coordinates")
        .ok_or_else(|| RenderError::Coastline("geometry without coordinates".to_string()))
}

fn as_array(value: &Value) -> RenderResult<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| RenderError::Coastline("expected a coordinate array".to_string()))
}

fn positions(value: &Value) -> RenderResult<Vec<(f64, f64)>> {
    as_array(value)?
        .iter()
        .map(|pos| {
            let pair = as_array(pos)?;
            match (pair.first().and_then(Value::as_f64), pair.get(1).and_then(Value::as_f64)) {
                (Some(lon), Some(lat)) => Ok((lon, lat)),
                _ => Err(RenderError::Coastline(format!("invalid position {}", pos))),
            }
        })
        .collect()
}
