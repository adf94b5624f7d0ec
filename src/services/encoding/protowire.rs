// =============================================================================
// MINIMAL PROTOBUF WIRE WRITER
// Enough of the proto3 wire format to assemble Cosmos SDK sign documents:
// varint and length-delimited fields, default values omitted.
// =============================================================================

const WIRE_VARINT: u64 = 0;
const WIRE_LEN: u64 = 2;

#[derive(Debug, Default)]
pub struct ProtoWriter {
    buf: Vec<u8>,
}

impl ProtoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Varint field. Zero is a proto3 default and is omitted.
    pub fn varint_field(&mut self, field: u32, value: u64) -> &mut Self {
        if value != 0 {
            self.key(field, WIRE_VARINT);
            self.varint(value);
        }
        self
    }

    /// Length-delimited field. Empty payloads are omitted.
    pub fn bytes_field(&mut self, field: u32, data: &[u8]) -> &mut Self {
        if !data.is_empty() {
            self.key(field, WIRE_LEN);
            self.varint(data.len() as u64);
            self.buf.extend_from_slice(data);
        }
        self
    }

    pub fn string_field(&mut self, field: u32, value: &str) -> &mut Self {
        self.bytes_field(field, value.as_bytes())
    }

    /// Embedded message field, written even when empty so that the
    /// presence of the submessage survives.
    pub fn message_field(&mut self, field: u32, message: ProtoWriter) -> &mut Self {
        let data = message.into_bytes();
        self.key(field, WIRE_LEN);
        self.varint(data.len() as u64);
        self.buf.extend_from_slice(&data);
        self
    }

    fn key(&mut self, field: u32, wire_type: u64) {
        self.varint(((field as u64) << 3) | wire_type);
    }

    fn varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                return;
            }
            self.buf.push(byte | 0x80);
        }
    }
}
