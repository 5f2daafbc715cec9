use crate::schema::tile::error::InvalidTileIdError;

use const_format::concatcp;
use fixedstr::fstr;
use scan_fmt::scan_fmt;

use std::fmt;
use std::str::FromStr;


/// Upper bound on the quadtree depth accepted from textual tile ids.
pub const MAX_ZOOM: u32 = 30;

const MAX_ZOOM_DIGIT_LEN: usize = 2;

pub type TileLabel = fstr<32>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl TileId {
    pub fn label(&self) -> TileLabel {
        TileLabel::from(self.to_string().as_str())
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl FromStr for TileId {
    type Err = InvalidTileIdError;

    fn from_str(text: &str) -> Result<TileId, Self::Err> {
        let (z, x, y) = match scan_fmt!(
            text,
            concatcp!("{", MAX_ZOOM_DIGIT_LEN, "d}/{d}/{d}"),
            u32, u32, u32
        ) {
            Ok(parsed) => parsed,
            Err(_) => {
                return Err(
                    InvalidTileIdError {
                        param: String::from("id"),
                        value: text.to_string(),
                        reason: String::from("Tile id does not match the form z/x/y"),
                    }
                );
            },
        };
        if z > MAX_ZOOM {
            return Err(
                InvalidTileIdError {
                    param: String::from("z"),
                    value: text.to_string(),
                    reason: format!("Zoom {} exceeds the allowed limit {}", z, MAX_ZOOM),
                }
            );
        }
        let coordinate_limit = 1u64 << z;
        if (x as u64) >= coordinate_limit {
            return Err(
                InvalidTileIdError {
                    param: String::from("x"),
                    value: text.to_string(),
                    reason: format!("Column {} exceeds the {} columns at zoom {}", x, coordinate_limit, z),
                }
            );
        }
        if (y as u64) >= coordinate_limit {
            return Err(
                InvalidTileIdError {
                    param: String::from("y"),
                    value: text.to_string(),
                    reason: format!("Row {} exceeds the {} rows at zoom {}", y, coordinate_limit, z),
                }
            );
        }
        return Ok(TileId { x, y, z });
    }
}
