//! Binary buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A bounds-checked little-endian reader over a borrowed byte slice.
///
/// Every accessor returns `Err` instead of panicking when the requested
/// bytes run past `end`, and leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use mgobson_buffers::Reader;
///
/// let data = [0x05, 0x00, 0x00, 0x00, b'a', 0x00];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_i32(), Ok(5));
/// assert_eq!(reader.try_cstr(), Ok("a"));
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader from a slice with custom start and end positions.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        Self { uint8, x, end }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.x)
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if n > self.size() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    /// Advances the cursor by `length` bytes.
    pub fn try_skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.check(length)?;
        self.x += length;
        Ok(())
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a signed 32-bit little-endian integer.
    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        let bytes = self.try_array::<4>()?;
        Ok(i32::from_le_bytes(bytes))
    }

    /// Reads an unsigned 32-bit little-endian integer.
    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        let bytes = self.try_array::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a signed 64-bit little-endian integer.
    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        let bytes = self.try_array::<8>()?;
        Ok(i64::from_le_bytes(bytes))
    }

    /// Reads a 64-bit little-endian float.
    #[inline]
    pub fn try_f64(&mut self) -> Result<f64, BufferError> {
        let bytes = self.try_array::<8>()?;
        Ok(f64::from_le_bytes(bytes))
    }

    /// Reads exactly `N` bytes into a fixed-size array.
    pub fn try_array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        Ok(bin)
    }

    /// Reads a UTF-8 string of `size` bytes.
    pub fn try_utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let start = self.x;
        let s = str::from_utf8(&self.uint8[start..start + size])
            .map_err(|_| BufferError::InvalidUtf8)?;
        self.x += size;
        Ok(s)
    }

    /// Reads a NUL-terminated UTF-8 string and consumes the terminator.
    pub fn try_cstr(&mut self) -> Result<&'a str, BufferError> {
        let start = self.x;
        let window = &self.uint8[start..self.end.max(start)];
        let len = window
            .iter()
            .position(|b| *b == 0)
            .ok_or(BufferError::UnterminatedCString)?;
        let s = str::from_utf8(&window[..len]).map_err(|_| BufferError::InvalidUtf8)?;
        self.x = start + len + 1;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_u8_success() {
        let data = [0x42u8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Ok(0x42));
        assert_eq!(reader.x, 1);
    }

    #[test]
    fn test_try_u8_end_of_buffer() {
        let data: [u8; 0] = [];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
        // Cursor must not advance on error
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_i32_little_endian() {
        let data = [0x14u8, 0x00, 0x00, 0x00];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i32(), Ok(20));
    }

    #[test]
    fn test_try_i32_negative() {
        let mut writer = crate::Writer::new();
        writer.i32(-123456);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i32(), Ok(-123456i32));
    }

    #[test]
    fn test_try_u32_end_of_buffer() {
        let data = [0x01u8, 0x02, 0x03]; // 3 bytes, not enough for u32
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u32(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_i64_negative() {
        let mut writer = crate::Writer::new();
        writer.i64(-9_999_999_999i64);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i64(), Ok(-9_999_999_999i64));
    }

    #[test]
    fn test_try_f64_success() {
        let mut writer = crate::Writer::new();
        writer.f64(std::f64::consts::PI);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_f64(), Ok(std::f64::consts::PI));
    }

    #[test]
    fn test_try_buf_end_of_buffer() {
        let data = [1u8, 2];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_buf(5), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_end_bounds_reads() {
        let data = [1u8, 2, 3, 4];
        let mut reader = Reader::from_slice(&data, 1, 3);
        assert_eq!(reader.size(), 2);
        assert_eq!(reader.try_buf(2), Ok([2u8, 3].as_ref()));
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_try_utf8_invalid() {
        // 0xff is not valid UTF-8
        let data = [0xffu8, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_utf8(2), Err(BufferError::InvalidUtf8));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_cstr() {
        let data = b"foo\0bar\0";
        let mut reader = Reader::new(data);
        assert_eq!(reader.try_cstr(), Ok("foo"));
        assert_eq!(reader.try_cstr(), Ok("bar"));
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn test_try_cstr_unterminated() {
        let data = b"foo\0";
        // End excludes the terminator.
        let mut reader = Reader::from_slice(data, 0, 3);
        assert_eq!(reader.try_cstr(), Err(BufferError::UnterminatedCString));
        assert_eq!(reader.x, 0);
    }
}
