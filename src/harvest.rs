use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::{
    locations::Location,
    places::{fetch, Place, PlacesApi, Search},
};

#[derive(Debug, Default)]
pub struct Harvest {
    pub places: Vec<Place>,
    /// Locations whose pagination stopped on an error.
    pub failed: usize,
}

/// Runs the search around each location in turn. A failing location is
/// logged and keeps its partial results; it never stops the run.
pub fn collect(
    api: &impl PlacesApi,
    search: &Search,
    locations: &[Location],
    pb: &ProgressBar,
) -> Harvest {
    let mut harvest = Harvest::default();

    for &location in locations {
        let before = harvest.places.len();
        if let Err(e) = fetch(api, search, location, &mut harvest.places) {
            pb.suspend(|| warn!(lat = location.x(), lng = location.y(), "{e}"));
            harvest.failed += 1;
        }
        pb.suspend(|| {
            info!(
                lat = location.x(),
                lng = location.y(),
                found = harvest.places.len() - before,
                "searched location"
            )
        });
        pb.inc(1);
    }

    harvest
}
