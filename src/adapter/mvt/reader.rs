use crate::schema::tile::error::DecodeError;

use std::result::Result;
use std::str;


pub const WIRE_TYPE_VARINT: u8 = 0;
pub const WIRE_TYPE_FIXED64: u8 = 1;
pub const WIRE_TYPE_LENGTH: u8 = 2;
pub const WIRE_TYPE_FIXED32: u8 = 5;

const MAX_VARINT_SHIFT: u32 = 64;

/// Cursor over one TLV-encoded byte range. Values are read on demand;
/// a nested message borrows a sub-range of the same buffer and the
/// parent re-synchronises by skipping the declared length afterwards.
pub struct PbfReader<'b> {
    buffer: &'b [u8],
    position: usize,
    tag: u64,
    wire_type: u8,
}

impl<'b> PbfReader<'b> {
    pub fn new(buffer: &'b [u8]) -> PbfReader<'b> {
        PbfReader {
            buffer,
            position: 0,
            tag: 0,
            wire_type: WIRE_TYPE_VARINT,
        }
    }

    /// Tag of the most recently advanced-to field.
    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// Wire type of the most recently advanced-to field.
    pub fn wire_type(&self) -> u8 {
        self.wire_type
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Reads the next field key and positions the cursor at its value.
    /// Returns false once the range is exhausted.
    pub fn advance(&mut self) -> Result<bool, DecodeError> {
        if self.remaining() == 0 {
            return Ok(false);
        }
        let key = self.read_varint()?;
        self.tag = key >> 3;
        self.wire_type = (key & 0x7) as u8;
        return Ok(true);
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            if shift >= MAX_VARINT_SHIFT {
                return Err(DecodeError::VarintOverflow);
            }
            if self.remaining() == 0 {
                return Err(DecodeError::TruncatedVarint);
            }
            let byte = self.buffer[self.position];
            self.position += 1;
            value |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Borrows the length-prefixed sub-range without consuming it. The
    /// cursor stays at the start of the payload, so the caller decides
    /// when to skip past it.
    pub fn read_length_delimited(&mut self) -> Result<&'b [u8], DecodeError> {
        let declared = self.read_varint()? as usize;
        let remaining = self.remaining();
        if declared > remaining {
            return Err(DecodeError::FieldOutOfBounds { declared, remaining });
        }
        return Ok(&self.buffer[self.position..(self.position + declared)]);
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let raw = self.read_length_delimited()?;
        self.position += raw.len();
        let text = str::from_utf8(raw)?;
        return Ok(text.to_string());
    }

    /// Advances past the value of the current field using its recorded
    /// wire type.
    pub fn skip_field(&mut self) -> Result<(), DecodeError> {
        match self.wire_type {
            WIRE_TYPE_VARINT => {
                self.read_varint()?;
                return Ok(());
            },
            WIRE_TYPE_FIXED64 => self.skip_bytes(8),
            WIRE_TYPE_LENGTH => {
                let declared = self.read_varint()? as usize;
                self.skip_bytes(declared)
            },
            WIRE_TYPE_FIXED32 => self.skip_bytes(4),
            other => Err(DecodeError::UnsupportedWireType(other)),
        }
    }

    pub fn skip_bytes(&mut self, count: usize) -> Result<(), DecodeError> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(DecodeError::FieldOutOfBounds { declared: count, remaining });
        }
        self.position += count;
        return Ok(());
    }
}




#[cfg(test)]
mod tests {
    use super::*;
    use super::test_utils::*;
    use std::boxed::Box;
    use std::error::Error;

    #[test]
    fn test_read_varint_small_values() -> Result<(), DecodeError> {
        let mut buffer = Vec::new();
        encode_varint(0, &mut buffer);
        encode_varint(1, &mut buffer);
        encode_varint(127, &mut buffer);
        let mut reader = PbfReader::new(buffer.as_slice());
        assert_eq!(0, reader.read_varint()?, "Incorrect varint value");
        assert_eq!(1, reader.read_varint()?, "Incorrect varint value");
        assert_eq!(127, reader.read_varint()?, "Incorrect varint value");
        assert_eq!(0, reader.remaining(), "Cursor did not consume the buffer");
        Ok(())
    }

    #[test]
    fn test_read_varint_multi_byte_values() -> Result<(), DecodeError> {
        let mut buffer = Vec::new();
        encode_varint(128, &mut buffer);
        encode_varint(300, &mut buffer);
        encode_varint(u32::MAX as u64, &mut buffer);
        encode_varint(u64::MAX, &mut buffer);
        let mut reader = PbfReader::new(buffer.as_slice());
        assert_eq!(128, reader.read_varint()?, "Incorrect varint value");
        assert_eq!(300, reader.read_varint()?, "Incorrect varint value");
        assert_eq!(u32::MAX as u64, reader.read_varint()?, "Incorrect varint value");
        assert_eq!(u64::MAX, reader.read_varint()?, "Incorrect varint value");
        Ok(())
    }

    #[test]
    fn test_read_varint_wire_bytes() -> Result<(), DecodeError> {
        let buffer = [0xac, 0x02];
        let mut reader = PbfReader::new(&buffer);
        assert_eq!(300, reader.read_varint()?, "Incorrect base 128 decoding");
        Ok(())
    }

    #[test]
    fn test_read_varint_truncated() -> Result<(), Box<dyn Error>> {
        let buffer = [0x80];
        let mut reader = PbfReader::new(&buffer);
        match reader.read_varint() {
            Err(DecodeError::TruncatedVarint) => (),
            other => panic!("Expected TruncatedVarint but got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_read_varint_overflow() -> Result<(), Box<dyn Error>> {
        let buffer = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
        let mut reader = PbfReader::new(&buffer);
        match reader.read_varint() {
            Err(DecodeError::VarintOverflow) => (),
            other => panic!("Expected VarintOverflow but got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_advance_reads_tag_and_wire_type() -> Result<(), DecodeError> {
        let mut buffer = Vec::new();
        encode_varint_field(3, 150, &mut buffer);
        encode_string_field(1, "water", &mut buffer);
        let mut reader = PbfReader::new(buffer.as_slice());

        assert!(reader.advance()?, "First field was not found");
        assert_eq!(3, reader.tag(), "Incorrect field tag");
        assert_eq!(WIRE_TYPE_VARINT, reader.wire_type(), "Incorrect wire type");
        assert_eq!(150, reader.read_varint()?, "Incorrect field value");

        assert!(reader.advance()?, "Second field was not found");
        assert_eq!(1, reader.tag(), "Incorrect field tag");
        assert_eq!(WIRE_TYPE_LENGTH, reader.wire_type(), "Incorrect wire type");
        assert_eq!("water", reader.read_string()?, "Incorrect field value");

        assert!(!reader.advance()?, "Exhausted reader still advanced");
        Ok(())
    }

    #[test]
    fn test_read_length_delimited_leaves_cursor_at_payload() -> Result<(), DecodeError> {
        let mut buffer = Vec::new();
        encode_blob_field(2, &[0xaa, 0xbb, 0xcc], &mut buffer);
        let mut reader = PbfReader::new(buffer.as_slice());
        assert!(reader.advance()?, "Field was not found");
        let payload = reader.read_length_delimited()?;
        assert_eq!(&[0xaa, 0xbb, 0xcc], payload, "Incorrect payload range");
        assert_eq!(3, reader.remaining(), "Cursor advanced past the payload");
        reader.skip_bytes(payload.len())?;
        assert_eq!(0, reader.remaining(), "Skip did not consume the payload");
        Ok(())
    }

    #[test]
    fn test_read_length_delimited_overrun() -> Result<(), Box<dyn Error>> {
        let mut buffer = Vec::new();
        encode_key(2, WIRE_TYPE_LENGTH, &mut buffer);
        encode_varint(16, &mut buffer);
        buffer.push(0xaa);
        let mut reader = PbfReader::new(buffer.as_slice());
        assert!(reader.advance()?, "Field was not found");
        match reader.read_length_delimited() {
            Err(DecodeError::FieldOutOfBounds { declared, remaining }) => {
                assert_eq!(16, declared, "Incorrect declared length");
                assert_eq!(1, remaining, "Incorrect remaining length");
            },
            other => panic!("Expected FieldOutOfBounds but got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_read_string_rejects_invalid_utf8() -> Result<(), Box<dyn Error>> {
        let mut buffer = Vec::new();
        encode_blob_field(1, &[0xff, 0xfe], &mut buffer);
        let mut reader = PbfReader::new(buffer.as_slice());
        assert!(reader.advance()?, "Field was not found");
        match reader.read_string() {
            Err(DecodeError::MalformedString(_)) => (),
            other => panic!("Expected MalformedString but got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_skip_field_every_wire_type() -> Result<(), DecodeError> {
        let mut buffer = Vec::new();
        encode_varint_field(1, 300, &mut buffer);
        encode_key(2, WIRE_TYPE_FIXED64, &mut buffer);
        buffer.extend_from_slice(&[0; 8]);
        encode_blob_field(3, &[0xaa, 0xbb], &mut buffer);
        encode_key(4, WIRE_TYPE_FIXED32, &mut buffer);
        buffer.extend_from_slice(&[0; 4]);
        encode_varint_field(5, 7, &mut buffer);
        let mut reader = PbfReader::new(buffer.as_slice());
        while reader.advance()? {
            if reader.tag() == 5 {
                assert_eq!(7, reader.read_varint()?, "Skipping corrupted the last field");
                return Ok(());
            }
            reader.skip_field()?;
        }
        panic!("Last field was never reached");
    }

    #[test]
    fn test_skip_field_unsupported_wire_type() -> Result<(), Box<dyn Error>> {
        let mut buffer = Vec::new();
        encode_key(1, 3, &mut buffer);
        let mut reader = PbfReader::new(buffer.as_slice());
        assert!(reader.advance()?, "Field was not found");
        match reader.skip_field() {
            Err(DecodeError::UnsupportedWireType(3)) => (),
            other => panic!("Expected UnsupportedWireType but got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_skip_bytes_overrun() -> Result<(), Box<dyn Error>> {
        let buffer = [0xaa, 0xbb];
        let mut reader = PbfReader::new(&buffer);
        match reader.skip_bytes(3) {
            Err(DecodeError::FieldOutOfBounds { declared, remaining }) => {
                assert_eq!(3, declared, "Incorrect declared length");
                assert_eq!(2, remaining, "Incorrect remaining length");
            },
            other => panic!("Expected FieldOutOfBounds but got {:?}", other),
        }
        Ok(())
    }
}
