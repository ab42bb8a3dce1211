use std::{collections::HashMap, fs::File, io, path::Path};

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};

use crate::places::Place;

pub const HEADER: [&str; 4] = ["Name", "Latitude", "Longitude", "Google Maps Link"];

/// Places keyed by `place_id`. A repeated id replaces the earlier record but
/// keeps the position where that id was first seen.
#[derive(Debug, Default)]
pub struct UniquePlaces {
    places: Vec<Place>,
    index: HashMap<String, usize>,
}

impl UniquePlaces {
    pub fn insert(&mut self, place: Place) -> Result<()> {
        let id = place.id()?.to_string();
        match self.index.get(&id) {
            Some(&i) => self.places[i] = place,
            None => {
                self.index.insert(id, self.places.len());
                self.places.push(place);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }
}

pub fn dedupe(places: impl IntoIterator<Item = Place>) -> Result<UniquePlaces> {
    let mut unique = UniquePlaces::default();
    for place in places {
        unique.insert(place)?;
    }
    Ok(unique)
}

pub fn write(places: &UniquePlaces, sink: impl io::Write) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(sink);
    wtr.write_record(HEADER)?;
    for place in places.iter() {
        wtr.serialize(place.row()?)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Deduplicates `places` and writes them to `path`, truncating any previous
/// file. Returns the number of rows written.
pub fn save(places: Vec<Place>, path: &Path) -> Result<usize> {
    let unique = dedupe(places)?;
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write(&unique, file).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(unique.len())
}
