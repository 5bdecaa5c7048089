//! # Waypoint queue
//!
//! Ordered list of waypoints still to be reached, loaded from the waypoint file recorded while
//! mapping the course.
//!
//! ## File format
//!
//! Plain text, the first line is a header and is skipped. Each following line is
//! `latitude,longitude` in decimal degrees. Lines with an empty or unparsable field are skipped.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, warn};
use std::{collections::VecDeque, fs::File, io::Read, path::Path};

use crate::geo::Waypoint;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// FIFO queue of waypoints, the front is the current target.
#[derive(Debug, Clone, Default)]
pub struct WaypointQueue {
    waypoints: VecDeque<Waypoint>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WaypointError {
    #[error("Could not open the waypoint file: {0}")]
    OpenError(std::io::Error),

    #[error("Could not read the waypoint file: {0}")]
    ReadError(csv::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WaypointQueue {
    /// Load the queue from the waypoint file at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WaypointError> {
        let file = File::open(path).map_err(WaypointError::OpenError)?;

        Self::from_reader(file)
    }

    /// Load the queue from a reader containing the waypoint file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WaypointError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut waypoints = VecDeque::new();

        for result in csv_reader.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) if e.is_io_error() => return Err(WaypointError::ReadError(e)),
                Err(e) => {
                    warn!("Skipping malformed waypoint file line: {}", e);
                    continue;
                }
            };

            let (lat_str, lon_str) = match (record.get(0), record.get(1)) {
                (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => (lat, lon),
                _ => continue,
            };

            match (lat_str.parse::<f64>(), lon_str.parse::<f64>()) {
                (Ok(lat), Ok(lon)) => {
                    debug!("Read waypoint {}, {}", lat, lon);
                    waypoints.push_back(Waypoint::from_deg(lat, lon));
                }
                _ => warn!(
                    "Skipping waypoint file line {}: cannot parse \"{},{}\"",
                    record.position().map_or(0, |p| p.line()),
                    lat_str,
                    lon_str
                ),
            }
        }

        Ok(Self { waypoints })
    }

    /// The current target waypoint.
    pub fn front(&self) -> Option<&Waypoint> {
        self.waypoints.front()
    }

    /// Remove the current target, returning it.
    pub fn pop_front(&mut self) -> Option<Waypoint> {
        self.waypoints.pop_front()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear()
    }

    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }
}

impl From<Vec<Waypoint>> for WaypointQueue {
    fn from(waypoints: Vec<Waypoint>) -> Self {
        Self {
            waypoints: waypoints.into(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_round_trip() {
        let points = [(52.205, 0.119), (52.2051, 0.1192), (-33.8688, 151.2093)];

        let mut path = std::env::temp_dir();
        path.push(format!("nav_waypoints_{}.csv", std::process::id()));

        {
            let mut f = File::create(&path).unwrap();
            writeln!(f, "latitude,longitude").unwrap();
            for (lat, lon) in points.iter() {
                writeln!(f, "{},{}", lat, lon).unwrap();
            }
        }

        let queue = WaypointQueue::from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(queue.len(), points.len());
        for (wp, (lat, lon)) in queue.iter().zip(points.iter()) {
            assert!((wp.latitude_rad - lat * std::f64::consts::PI / 180.0).abs() < 1e-12);
            assert!((wp.longitude_rad - lon * std::f64::consts::PI / 180.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_skips_bad_lines() {
        let contents = "lat,lon\n\
            10.0,20.0\n\
            ,20.0\n\
            10.0,\n\
            abc,20.0\n\
            \n\
            11.0\n\
            12.0 , 22.0\n";

        let queue = WaypointQueue::from_reader(contents.as_bytes()).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.front(), Some(&Waypoint::from_deg(10.0, 20.0)));
        assert_eq!(queue.iter().nth(1), Some(&Waypoint::from_deg(12.0, 22.0)));
    }

    #[test]
    fn test_header_only() {
        let queue = WaypointQueue::from_reader("lat,lon\n".as_bytes()).unwrap();
        assert!(queue.is_empty());

        let queue = WaypointQueue::from_reader("".as_bytes()).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            WaypointQueue::from_path("/nonexistent/waypoints.csv"),
            Err(WaypointError::OpenError(_))
        ));
    }

    #[test]
    fn test_fifo() {
        let mut queue = WaypointQueue::from(vec![
            Waypoint::from_deg(1.0, 1.0),
            Waypoint::from_deg(2.0, 2.0),
        ]);

        assert_eq!(queue.pop_front(), Some(Waypoint::from_deg(1.0, 1.0)));
        assert_eq!(queue.front(), Some(&Waypoint::from_deg(2.0, 2.0)));
        queue.clear();
        assert!(queue.is_empty());
    }
}
