use crate::adapter::mvt::reader::PbfReader;
use crate::schema::tile::error::DecodeError;

use std::result::Result;


pub const COMMAND_MOVE_TO: u64 = 1;
pub const COMMAND_LINE_TO: u64 = 2;
pub const COMMAND_CLOSE_PATH: u64 = 7;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryElement {
    MoveTo {
        x: i32,
        y: i32,
    },
    LineTo {
        x: i32,
        y: i32,
    },
    ClosePath,
}

/// Streaming decoder for one feature's packed geometry field. Command
/// varints carry a code in the low three bits and a repeat count above
/// them. Coordinates are zigzag deltas accumulated onto the previous
/// position, which persists across commands and wraps at the i32
/// bounds.
pub struct GeometryDecoder<'b> {
    reader: PbfReader<'b>,
    code: u64,
    repeat: u64,
    finished: bool,
    x: i32,
    y: i32,
}

impl<'b> GeometryDecoder<'b> {
    pub fn new(buffer: &'b [u8]) -> GeometryDecoder<'b> {
        GeometryDecoder {
            reader: PbfReader::new(buffer),
            code: 0,
            repeat: 0,
            finished: false,
            x: 0,
            y: 0,
        }
    }

    /// Yields the next geometry element, or None once the stream ends.
    /// A command code other than MoveTo, LineTo or ClosePath marks the
    /// end of the stream rather than an error.
    pub fn next(&mut self) -> Result<Option<GeometryElement>, DecodeError> {
        if self.finished {
            return Ok(None);
        }
        while self.repeat == 0 {
            if self.reader.remaining() == 0 {
                self.finished = true;
                return Ok(None);
            }
            let command = self.reader.read_varint()?;
            self.code = command & 0x7;
            self.repeat = command >> 3;
            match self.code {
                COMMAND_MOVE_TO | COMMAND_LINE_TO | COMMAND_CLOSE_PATH => (),
                _ => {
                    self.finished = true;
                    return Ok(None);
                },
            }
        }
        self.repeat -= 1;
        if self.code == COMMAND_CLOSE_PATH {
            return Ok(Some(GeometryElement::ClosePath));
        }
        self.x = self.x.wrapping_add(decode_zigzag(self.reader.read_varint()?));
        self.y = self.y.wrapping_add(decode_zigzag(self.reader.read_varint()?));
        if self.code == COMMAND_MOVE_TO {
            return Ok(Some(GeometryElement::MoveTo { x: self.x, y: self.y }));
        } else {
            return Ok(Some(GeometryElement::LineTo { x: self.x, y: self.y }));
        }
    }
}

fn decode_zigzag(value: u64) -> i32 {
    return (value >> 1) as i32 ^ -((value & 1) as i32);
}
