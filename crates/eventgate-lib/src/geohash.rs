//! Geohash encoding and decoding.
//!
//! A geohash interleaves longitude and latitude bisection bits (longitude
//! first) and packs them five at a time into the base-32 alphabet below.
//! Each added character narrows the cell, so string length controls
//! precision.

use crate::error::{Error, Result};

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest geohash this module will produce or accept.
pub const MAX_PRECISION: usize = 12;

/// Bounding box of a decoded geohash cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Cell {
    /// Centre point of the cell as `(lat, lon)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Whether `(lat, lon)` lies inside the cell, edges included.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Encode a coordinate pair as a geohash of `precision` characters.
pub fn encode(lat: f64, lon: f64, precision: usize) -> Result<String> {
    if !(1..=MAX_PRECISION).contains(&precision) {
        return Err(Error::InvalidGeohash {
            message: format!("precision {precision} outside 1..={MAX_PRECISION}"),
        });
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidGeohash {
            message: format!("latitude {lat} outside -90..=90"),
        });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidGeohash {
            message: format!("longitude {lon} outside -180..=180"),
        });
    }

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);
    let mut even = true;
    let mut bits = 0u8;
    let mut index = 0usize;

    while hash.len() < precision {
        let (range, value) = if even {
            (&mut lon_range, lon)
        } else {
            (&mut lat_range, lat)
        };
        let mid = (range.0 + range.1) / 2.0;
        index <<= 1;
        if value >= mid {
            index |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }
        even = !even;

        bits += 1;
        if bits == 5 {
            hash.push(BASE32[index] as char);
            bits = 0;
            index = 0;
        }
    }

    Ok(hash)
}

/// Decode a geohash into the cell it denotes.
pub fn decode(hash: &str) -> Result<Cell> {
    if hash.is_empty() || hash.len() > MAX_PRECISION {
        return Err(Error::InvalidGeohash {
            message: format!("length {} outside 1..={MAX_PRECISION}", hash.len()),
        });
    }

    let mut cell = Cell {
        min_lat: -90.0,
        max_lat: 90.0,
        min_lon: -180.0,
        max_lon: 180.0,
    };
    let mut even = true;

    for ch in hash.chars() {
        let value = BASE32
            .iter()
            .position(|&b| b as char == ch.to_ascii_lowercase())
            .ok_or_else(|| Error::InvalidGeohash {
                message: format!("character '{ch}' is not in the geohash alphabet"),
            })?;

        for shift in (0..5).rev() {
            let bit = (value >> shift) & 1 == 1;
            if even {
                let mid = (cell.min_lon + cell.max_lon) / 2.0;
                if bit {
                    cell.min_lon = mid;
                } else {
                    cell.max_lon = mid;
                }
            } else {
                let mid = (cell.min_lat + cell.max_lat) / 2.0;
                if bit {
                    cell.min_lat = mid;
                } else {
                    cell.max_lat = mid;
                }
            }
            even = !even;
        }
    }

    Ok(cell)
}
