#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(0, 1)]
#[test_case(1, 1)]
#[test_case(127, 1)]
#[test_case(128, 2)]
#[test_case(16_383, 2)]
#[test_case(16_384, 3)]
#[test_case(u64::from(u32::MAX), 5)]
#[test_case(u64::MAX, 10)]
fn varint_size___matches_encoded_length(value: u64, expected: usize) {
    let mut writer = WireWriter::new();
    writer.write_varint(value);

    assert_eq!(varint_size(value), expected);
    assert_eq!(writer.len(), expected);
}

#[test_case(1, WireType::Varint, 8)]
#[test_case(2, WireType::LengthDelimited, 18)]
#[test_case(3, WireType::LengthDelimited, 26)]
#[test_case(5, WireType::Fixed32, 45)]
#[test_case(16, WireType::Fixed64, 129)]
fn make_tag___packs_number_and_wire_type(number: u32, wire_type: WireType, expected: u32) {
    assert_eq!(make_tag(number, wire_type), expected);
    assert_eq!(split_tag(expected).unwrap(), (number, wire_type));
}

#[test]
fn split_tag___rejects_field_zero() {
    assert_eq!(split_tag(2), Err(WireError::ZeroFieldNumber));
}

#[test]
fn split_tag___rejects_unknown_wire_type() {
    assert_eq!(split_tag((1 << 3) | 7), Err(WireError::InvalidWireType(7)));
}

#[test_case(1, 1)]
#[test_case(15, 1)]
#[test_case(16, 2)]
#[test_case(2047, 2)]
#[test_case(2048, 3)]
fn tag_size___grows_with_field_number(number: u32, expected: usize) {
    assert_eq!(tag_size(number), expected);
}

#[test_case(0, 0)]
#[test_case(-1, 1)]
#[test_case(1, 2)]
#[test_case(-2, 3)]
#[test_case(i32::MAX, u32::MAX - 1)]
#[test_case(i32::MIN, u32::MAX)]
fn encode_zigzag32___interleaves_signs(value: i32, expected: u32) {
    assert_eq!(encode_zigzag32(value), expected);
    assert_eq!(decode_zigzag32(expected), value);
}

#[test]
fn encode_zigzag64___roundtrips_extremes() {
    for value in [0, -1, 1, i64::MIN, i64::MAX] {
        assert_eq!(decode_zigzag64(encode_zigzag64(value)), value);
    }
}

#[test_case(FieldType::Int32, WireType::Varint)]
#[test_case(FieldType::Sint64, WireType::Varint)]
#[test_case(FieldType::Bool, WireType::Varint)]
#[test_case(FieldType::Enum, WireType::Varint)]
#[test_case(FieldType::Double, WireType::Fixed64)]
#[test_case(FieldType::Sfixed64, WireType::Fixed64)]
#[test_case(FieldType::Float, WireType::Fixed32)]
#[test_case(FieldType::Fixed32, WireType::Fixed32)]
#[test_case(FieldType::String, WireType::LengthDelimited)]
#[test_case(FieldType::Bytes, WireType::LengthDelimited)]
#[test_case(FieldType::Message, WireType::LengthDelimited)]
#[test_case(FieldType::Group, WireType::StartGroup)]
fn WireType___for_field_type___maps_layout(ty: FieldType, expected: WireType) {
    assert_eq!(WireType::for_field_type(ty), expected);
}

#[test]
fn WireReader___reads_back_writer_output() {
    let mut writer = WireWriter::new();
    writer.write_tag(1, WireType::Varint);
    writer.write_varint(300);
    writer.write_tag(2, WireType::Fixed32);
    writer.write_fixed32(0xdead_beef);
    writer.write_tag(3, WireType::Fixed64);
    writer.write_fixed64(u64::MAX);
    writer.write_tag(4, WireType::LengthDelimited);
    writer.write_length_delimited(b"hi");
    let bytes = writer.into_bytes();

    let mut reader = WireReader::new(&bytes);

    assert_eq!(reader.read_tag().unwrap(), Some((1, WireType::Varint)));
    assert_eq!(reader.read_varint().unwrap(), 300);
    assert_eq!(reader.read_tag().unwrap(), Some((2, WireType::Fixed32)));
    assert_eq!(reader.read_fixed32().unwrap(), 0xdead_beef);
    assert_eq!(reader.read_tag().unwrap(), Some((3, WireType::Fixed64)));
    assert_eq!(reader.read_fixed64().unwrap(), u64::MAX);
    assert_eq!(reader.read_tag().unwrap(), Some((4, WireType::LengthDelimited)));
    assert_eq!(reader.read_length_delimited().unwrap(), b"hi");
    assert_eq!(reader.read_tag().unwrap(), None);
    assert!(reader.is_at_end());
}

#[test]
fn WireReader___truncated_varint___returns_error() {
    let mut reader = WireReader::new(&[0x80, 0x80]);

    assert_eq!(reader.read_varint(), Err(WireError::Truncated));
}

#[test]
fn WireReader___overlong_varint___returns_error() {
    let bytes = [0xff; 11];
    let mut reader = WireReader::new(&bytes);

    assert_eq!(reader.read_varint(), Err(WireError::VarintOverflow));
}

#[test]
fn WireReader___length_past_end___returns_error() {
    let mut reader = WireReader::new(&[5, b'a', b'b']);

    assert_eq!(reader.read_length_delimited(), Err(WireError::Truncated));
}

#[test]
fn WireReader___skip_field___advances_past_payload() {
    let mut writer = WireWriter::new();
    writer.write_length_delimited(b"skipped");
    writer.write_fixed32(7);
    let bytes = writer.into_bytes();
    let mut reader = WireReader::new(&bytes);

    reader.skip_field(9, WireType::LengthDelimited).unwrap();

    assert_eq!(reader.read_fixed32().unwrap(), 7);
}

#[test]
fn WireReader___skip_group___is_unsupported() {
    let mut reader = WireReader::new(&[]);

    assert_eq!(
        reader.skip_field(4, WireType::StartGroup),
        Err(WireError::UnsupportedGroup(4))
    );
}

#[test]
fn WireReader___read_tag_wider_than_32_bits___is_tag_overflow() {
    let wide = (1u64 << 32) | u64::from(make_tag(1, WireType::Varint));
    let mut writer = WireWriter::new();
    writer.write_varint(wide);
    let bytes = writer.into_bytes();
    let mut reader = WireReader::new(&bytes);

    assert_eq!(reader.read_tag(), Err(WireError::TagOverflow(wide)));
}

#[test]
fn WireReader___read_tag_at_u32_max_width___is_split() {
    let tag = make_tag(1 << 28, WireType::Fixed32);
    let mut writer = WireWriter::new();
    writer.write_varint(u64::from(tag));
    let bytes = writer.into_bytes();
    let mut reader = WireReader::new(&bytes);

    assert_eq!(reader.read_tag(), Ok(Some((1 << 28, WireType::Fixed32))));
}
