//! Spot records for the venue crowd map.
//! The viewer only reads these; status updates happen in the venue's admin
//! tooling and arrive as a fresh payload.

use serde::{Deserialize, Serialize};

use crate::util::clog;

/// Crowd level reported for a spot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdStatus {
    Available,
    SlightlyCrowded,
    Crowded,
}

impl CrowdStatus {
    pub const ALL: [CrowdStatus; 3] = [
        CrowdStatus::Available,
        CrowdStatus::SlightlyCrowded,
        CrowdStatus::Crowded,
    ];

    pub fn color(&self) -> &'static str {
        match self {
            CrowdStatus::Available => "#3B82F6",
            CrowdStatus::SlightlyCrowded => "#22C55E",
            CrowdStatus::Crowded => "#EF4444",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrowdStatus::Available => "Available",
            CrowdStatus::SlightlyCrowded => "Slightly crowded",
            CrowdStatus::Crowded => "Crowded",
        }
    }
}

/// One venue location shown on the map. `position_x`/`position_y` are percent
/// offsets into the map image, 0..=100.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: CrowdStatus,
    #[serde(default)]
    pub wait_time_mins: u32,
    pub position_x: f64,
    pub position_y: f64,
}

/// Marker records supplied by the host page as
/// `<script id="crowd-spots" type="application/json">...</script>`.
/// Falls back to the built-in seed set when absent or malformed.
pub fn load_spots() -> Vec<Spot> {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id("crowd-spots") {
            if let Some(raw) = el.text_content() {
                match serde_json::from_str::<Vec<Spot>>(&raw) {
                    Ok(spots) => return spots,
                    Err(e) => clog(&format!("crowd-spots payload rejected: {}", e)),
                }
            }
        }
    }
    sample_spots()
}

pub fn sample_spots() -> Vec<Spot> {
    fn spot(
        id: u32,
        name: &str,
        description: &str,
        status: CrowdStatus,
        wait_time_mins: u32,
        position_x: f64,
        position_y: f64,
    ) -> Spot {
        Spot {
            id,
            name: name.to_string(),
            description: Some(description.to_string()),
            status,
            wait_time_mins,
            position_x,
            position_y,
        }
    }
    vec![
        spot(
            1,
            "Gem Hunt",
            "Sift the gravel beds for polished gemstones to take home.",
            CrowdStatus::Crowded,
            25,
            32.0,
            58.0,
        ),
        spot(
            2,
            "Fossil Dig",
            "Chisel real fossils out of the excavation wall.",
            CrowdStatus::SlightlyCrowded,
            10,
            48.0,
            41.0,
        ),
        spot(
            3,
            "Mineral Hall",
            "Indoor exhibition of the museum's mineral collection.",
            CrowdStatus::Available,
            0,
            63.0,
            27.0,
        ),
        spot(
            4,
            "Restaurant",
            "Table service; the queue peaks around noon.",
            CrowdStatus::SlightlyCrowded,
            15,
            74.0,
            62.0,
        ),
        spot(
            5,
            "Gift Shop",
            "Stones, fossils, and souvenirs by the exit gate.",
            CrowdStatus::Available,
            0,
            85.0,
            48.0,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_snake_case_wire_names() {
        let parsed: CrowdStatus = serde_json::from_str("\"slightly_crowded\"").unwrap();
        assert_eq!(parsed, CrowdStatus::SlightlyCrowded);
        assert_eq!(
            serde_json::to_string(&CrowdStatus::Available).unwrap(),
            "\"available\""
        );
    }

    #[test]
    fn spot_parses_the_feed_payload_shape() {
        let raw = r#"[
            {"id": 7, "name": "Gem Hunt", "status": "crowded",
             "wait_time_mins": 30, "position_x": 32.5, "position_y": 58.0},
            {"id": 8, "name": "Gift Shop", "description": "By the exit.",
             "status": "available", "position_x": 85.0, "position_y": 48.0}
        ]"#;
        let spots: Vec<Spot> = serde_json::from_str(raw).unwrap();
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[0].status, CrowdStatus::Crowded);
        assert_eq!(spots[0].wait_time_mins, 30);
        assert_eq!(spots[0].description, None);
        assert_eq!(spots[1].wait_time_mins, 0);
        assert_eq!(spots[1].description.as_deref(), Some("By the exit."));
    }

    #[test]
    fn sample_positions_stay_on_the_map() {
        for s in sample_spots() {
            assert!((0.0..=100.0).contains(&s.position_x), "{}", s.name);
            assert!((0.0..=100.0).contains(&s.position_y), "{}", s.name);
        }
    }

    #[test]
    fn every_status_has_a_distinct_color() {
        let mut colors: Vec<_> = CrowdStatus::ALL.iter().map(|s| s.color()).collect();
        colors.dedup();
        assert_eq!(colors.len(), 3);
    }
}
