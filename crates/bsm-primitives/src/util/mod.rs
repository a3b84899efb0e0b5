//! Binary serialization helpers.
//!
//! Provides the Bitcoin VarInt length prefix and `ByteWriter`, a growable
//! buffer used to assemble hash preimages.

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A Bitcoin protocol variable-length integer.
///
/// The encoding uses 1, 3, 5, or 9 bytes depending on the magnitude of the
/// value, always choosing the smallest form that can hold it.
///
/// See <http://learnmeabitcoin.com/glossary/varint>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.length());
        self.append_to(&mut buf);
        buf
    }

    /// Append the encoded VarInt to `dst`.
    ///
    /// # Arguments
    /// * `dst` - Buffer to extend.
    pub fn append_to(&self, dst: &mut Vec<u8>) {
        let v = self.0;
        if v < 0xfd {
            dst.push(v as u8);
        } else if v <= 0xffff {
            dst.push(0xfd);
            dst.extend_from_slice(&(v as u16).to_le_bytes());
        } else if v <= 0xffff_ffff {
            dst.push(0xfe);
            dst.extend_from_slice(&(v as u32).to_le_bytes());
        } else {
            dst.push(0xff);
            dst.extend_from_slice(&v.to_le_bytes());
        }
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// An append-only byte buffer for Bitcoin-style serialization.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        ByteWriter { buf: Vec::new() }
    }

    /// Create an empty writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a VarInt.
    pub fn write_varint(&mut self, varint: VarInt) {
        varint.append_to(&mut self.buf);
    }

    /// Append `bytes` preceded by its length as a VarInt.
    ///
    /// This is the Bitcoin serialization of a byte string.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Borrow the accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
