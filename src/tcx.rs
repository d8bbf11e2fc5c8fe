//! TCX trackpoint extraction.
//!
//! Streams through a Training Center XML document and collects every
//! `Trackpoint/Position` as a planar point with `x` = longitude and
//! `y` = latitude. Namespace prefixes are ignored; only local element
//! names matter.
//!
//! Malformed documents do not fail the pipeline: parsing stops at the
//! first syntax error with a warning and whatever was collected so
//! far is returned. An empty result surfaces later as the projector's
//! empty-track error.

use std::path::Path;

use kurbo::Point;
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::RenderError;

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Latitude,
    Longitude,
}

/// Read a TCX file and extract its trackpoint coordinates.
pub fn parse_file(path: &Path) -> Result<Vec<Point>, RenderError> {
    let xml = std::fs::read_to_string(path)?;
    Ok(parse_str(&xml))
}

/// Extract trackpoint coordinates from TCX text.
pub fn parse_str(xml: &str) -> Vec<Point> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut points = Vec::new();
    let mut in_position = false;
    let mut field: Option<Field> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"Position" => {
                    in_position = true;
                    latitude = None;
                    longitude = None;
                }
                b"LatitudeDegrees" if in_position => field = Some(Field::Latitude),
                b"LongitudeDegrees" if in_position => field = Some(Field::Longitude),
                _ => {}
            },
            Ok(Event::Text(ref t)) => {
                if let Some(which) = field {
                    let text = match t.unescape() {
                        Ok(text) => text,
                        Err(err) => {
                            warn!("stopping TCX parse on bad text node: {err}");
                            break;
                        }
                    };
                    match text.trim().parse::<f64>() {
                        Ok(value) => match which {
                            Field::Latitude => latitude = Some(value),
                            Field::Longitude => longitude = Some(value),
                        },
                        Err(_) => debug!("skipping non-numeric coordinate {:?}", text),
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"Position" => {
                    match (latitude, longitude) {
                        (Some(lat), Some(lon)) => points.push(Point::new(lon, lat)),
                        _ => debug!("skipping position without both coordinates"),
                    }
                    in_position = false;
                }
                b"LatitudeDegrees" | b"LongitudeDegrees" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                warn!("stopping TCX parse on malformed XML: {err}");
                break;
            }
            _ => {}
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2">
  <Activities><Activity Sport="Running"><Lap>
    <Track>
      <Trackpoint>
        <Time>2024-05-01T08:00:00Z</Time>
        <Position>
          <LatitudeDegrees>40.7128</LatitudeDegrees>
          <LongitudeDegrees>-74.0060</LongitudeDegrees>
        </Position>
      </Trackpoint>
      <Trackpoint>
        <Time>2024-05-01T08:00:05Z</Time>
      </Trackpoint>
      <Trackpoint>
        <Position>
          <LatitudeDegrees>40.7130</LatitudeDegrees>
          <LongitudeDegrees>-74.0058</LongitudeDegrees>
        </Position>
      </Trackpoint>
    </Track>
  </Lap></Activity></Activities>
</TrainingCenterDatabase>"#;

    #[test]
    fn extracts_positions_and_skips_bare_trackpoints() {
        let points = parse_str(SAMPLE);
        assert_eq!(points.len(), 2);
        assert!((points[0].x - -74.0060).abs() < 1e-12);
        assert!((points[0].y - 40.7128).abs() < 1e-12);
        assert!((points[1].x - -74.0058).abs() < 1e-12);
    }

    #[test]
    fn malformed_document_yields_what_was_collected() {
        let truncated = &SAMPLE[..SAMPLE.find("</Trackpoint>").unwrap()];
        let points = parse_str(truncated);
        assert!(points.len() <= 1);
    }

    #[test]
    fn garbage_input_yields_empty() {
        assert!(parse_str("not xml at all").is_empty());
    }

    #[test]
    fn position_missing_one_coordinate_is_skipped() {
        let xml = r#"<Track><Trackpoint><Position>
            <LatitudeDegrees>1.0</LatitudeDegrees>
        </Position></Trackpoint></Track>"#;
        assert!(parse_str(xml).is_empty());
    }
}
